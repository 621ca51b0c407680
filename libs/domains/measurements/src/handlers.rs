use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_helpers::{
    ObjectIdPath, ValidatedJson,
    errors::responses::{
        BadRequestObjectIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::MeasurementResult;
use crate::models::{
    Building, CreateBuilding, CreateElement, CreateProject, Element, ElementFilter, ElementType,
    Opening, Project, ProjectSummary, ProjectType, SummaryGroup,
};
use crate::repository::MeasurementRepository;
use crate::service::MeasurementService;

/// OpenAPI documentation for the Measurement API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_project,
        list_projects,
        get_project,
        create_building,
        list_buildings,
        create_element,
        list_elements,
        project_summary,
        export_elements_csv,
    ),
    components(
        schemas(
            Project,
            CreateProject,
            ProjectType,
            Building,
            CreateBuilding,
            Element,
            CreateElement,
            ElementType,
            Opening,
            ElementFilter,
            ProjectSummary,
            SummaryGroup
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestObjectIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Projects", description = "Construction project endpoints"),
        (name = "Buildings", description = "Building endpoints, scoped to a parent project"),
        (name = "Elements", description = "Measured element endpoints (doors, closets, dressings)")
    )
)]
pub struct ApiDoc;

/// Create the measurement router with all HTTP endpoints
pub fn router<R: MeasurementRepository + 'static>(service: MeasurementService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/{project_id}", get(get_project))
        .route("/projects/{project_id}/buildings", get(list_buildings))
        .route("/projects/{project_id}/elements", get(list_elements))
        .route("/projects/{project_id}/summary", get(project_summary))
        .route(
            "/projects/{project_id}/export/csv",
            get(export_elements_csv),
        )
        .route("/buildings", post(create_building))
        .route("/elements", post(create_element))
        .with_state(shared_service)
}

/// Create a new project
#[utoipa::path(
    post,
    path = "/projects",
    tag = "Projects",
    request_body = CreateProject,
    responses(
        (status = 201, description = "Project created successfully", body = Project),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_project<R: MeasurementRepository>(
    State(service): State<Arc<MeasurementService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProject>,
) -> MeasurementResult<impl IntoResponse> {
    let project = service.create_project(input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// List all projects
#[utoipa::path(
    get,
    path = "/projects",
    tag = "Projects",
    responses(
        (status = 200, description = "List of projects", body = Vec<Project>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_projects<R: MeasurementRepository>(
    State(service): State<Arc<MeasurementService<R>>>,
) -> MeasurementResult<Json<Vec<Project>>> {
    let projects = service.list_projects().await?;
    Ok(Json(projects))
}

/// Get a project by ID
#[utoipa::path(
    get,
    path = "/projects/{project_id}",
    tag = "Projects",
    params(
        ("project_id" = String, Path, description = "Project ID (24-character hex)")
    ),
    responses(
        (status = 200, description = "Project found", body = Project),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_project<R: MeasurementRepository>(
    State(service): State<Arc<MeasurementService<R>>>,
    ObjectIdPath(project_id): ObjectIdPath,
) -> MeasurementResult<Json<Project>> {
    let project = service.get_project(project_id).await?;
    Ok(Json(project))
}

/// Create a new building under an existing project
#[utoipa::path(
    post,
    path = "/buildings",
    tag = "Buildings",
    request_body = CreateBuilding,
    responses(
        (status = 201, description = "Building created successfully", body = Building),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_building<R: MeasurementRepository>(
    State(service): State<Arc<MeasurementService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateBuilding>,
) -> MeasurementResult<impl IntoResponse> {
    let building = service.create_building(input).await?;
    Ok((StatusCode::CREATED, Json(building)))
}

/// List the buildings of a project
#[utoipa::path(
    get,
    path = "/projects/{project_id}/buildings",
    tag = "Buildings",
    params(
        ("project_id" = String, Path, description = "Project ID (24-character hex)")
    ),
    responses(
        (status = 200, description = "Buildings of the project", body = Vec<Building>),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_buildings<R: MeasurementRepository>(
    State(service): State<Arc<MeasurementService<R>>>,
    ObjectIdPath(project_id): ObjectIdPath,
) -> MeasurementResult<Json<Vec<Building>>> {
    let buildings = service.list_buildings(project_id).await?;
    Ok(Json(buildings))
}

/// Create a new element under an existing project (and optionally building)
#[utoipa::path(
    post,
    path = "/elements",
    tag = "Elements",
    request_body = CreateElement,
    responses(
        (status = 201, description = "Element created successfully", body = Element),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_element<R: MeasurementRepository>(
    State(service): State<Arc<MeasurementService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateElement>,
) -> MeasurementResult<impl IntoResponse> {
    let element = service.create_element(input).await?;
    Ok((StatusCode::CREATED, Json(element)))
}

/// List the elements of a project, optionally narrowed to one building
#[utoipa::path(
    get,
    path = "/projects/{project_id}/elements",
    tag = "Elements",
    params(
        ("project_id" = String, Path, description = "Project ID (24-character hex)"),
        ElementFilter
    ),
    responses(
        (status = 200, description = "Elements of the project", body = Vec<Element>),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_elements<R: MeasurementRepository>(
    State(service): State<Arc<MeasurementService<R>>>,
    ObjectIdPath(project_id): ObjectIdPath,
    Query(filter): Query<ElementFilter>,
) -> MeasurementResult<Json<Vec<Element>>> {
    let elements = service.list_elements(project_id, filter).await?;
    Ok(Json(elements))
}

/// Quantity totals for a project, grouped by (type, configuration)
#[utoipa::path(
    get,
    path = "/projects/{project_id}/summary",
    tag = "Elements",
    params(
        ("project_id" = String, Path, description = "Project ID (24-character hex)")
    ),
    responses(
        (status = 200, description = "Quantity totals per (type, configuration) group", body = ProjectSummary),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn project_summary<R: MeasurementRepository>(
    State(service): State<Arc<MeasurementService<R>>>,
    ObjectIdPath(project_id): ObjectIdPath,
) -> MeasurementResult<Json<ProjectSummary>> {
    let summary = service.project_summary(project_id).await?;
    Ok(Json(summary))
}

/// Export a project's elements as a CSV download
#[utoipa::path(
    get,
    path = "/projects/{project_id}/export/csv",
    tag = "Elements",
    params(
        ("project_id" = String, Path, description = "Project ID (24-character hex)")
    ),
    responses(
        (status = 200, description = "CSV file, one row per element", content_type = "text/csv", body = String),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn export_elements_csv<R: MeasurementRepository>(
    State(service): State<Arc<MeasurementService<R>>>,
    ObjectIdPath(project_id): ObjectIdPath,
) -> MeasurementResult<Response> {
    let rendered = service.export_elements_csv(project_id).await?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=project_{}_elements.csv",
                project_id.to_hex()
            ),
        ),
    ];

    Ok((headers, rendered).into_response())
}
