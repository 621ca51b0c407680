//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the measurement API
///
/// The measurements domain declares absolute paths (its routes are merged
/// at the router root), so it is nested under an empty prefix here.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Measurement Management API",
        version = "0.1.0",
        description = "MongoDB-based REST API for managing measurement projects, buildings, and elements",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    nest(
        (path = "", api = domain_measurements::ApiDoc)
    ),
    tags(
        (name = "Projects", description = "Project management endpoints (MongoDB)"),
        (name = "Buildings", description = "Building management endpoints (MongoDB)"),
        (name = "Elements", description = "Element management, summary, and CSV export endpoints")
    )
)]
pub struct ApiDoc;
