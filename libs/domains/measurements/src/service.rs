//! Measurement Service - Business logic layer

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use tracing::instrument;
use validator::Validate;

use crate::csv;
use crate::error::{MeasurementError, MeasurementResult};
use crate::models::{
    Building, CreateBuilding, CreateElement, CreateProject, Element, ElementFilter, Project,
    ProjectSummary, parse_object_id,
};
use crate::repository::MeasurementRepository;

/// Measurement service providing business logic operations
///
/// The service layer validates input, runs the referential-integrity checks
/// (parents must exist before a child is written), and orchestrates
/// repository operations. Checks always run in the same order: identifier
/// format, then project existence, then building existence when one is
/// referenced, then the write.
pub struct MeasurementService<R: MeasurementRepository> {
    repository: Arc<R>,
}

impl<R: MeasurementRepository> MeasurementService<R> {
    /// Create a new MeasurementService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new project
    #[instrument(skip(self, input), fields(project_name = %input.name))]
    pub async fn create_project(&self, input: CreateProject) -> MeasurementResult<Project> {
        input
            .validate()
            .map_err(|e| MeasurementError::Validation(e.to_string()))?;

        self.repository.create_project(input).await
    }

    /// Get a project by ID
    #[instrument(skip(self))]
    pub async fn get_project(&self, id: ObjectId) -> MeasurementResult<Project> {
        self.repository
            .get_project(id)
            .await?
            .ok_or(MeasurementError::NotFound("Project"))
    }

    /// List all projects
    #[instrument(skip(self))]
    pub async fn list_projects(&self) -> MeasurementResult<Vec<Project>> {
        self.repository.list_projects().await
    }

    /// Create a new building after verifying its parent project exists
    #[instrument(skip(self, input), fields(building_name = %input.name))]
    pub async fn create_building(&self, input: CreateBuilding) -> MeasurementResult<Building> {
        input
            .validate()
            .map_err(|e| MeasurementError::Validation(e.to_string()))?;

        let project_id = parse_object_id(&input.project_id, "project_id")?;
        if !self.repository.project_exists(project_id).await? {
            return Err(MeasurementError::ParentNotFound("project"));
        }

        self.repository.create_building(input).await
    }

    /// List the buildings belonging to a project
    #[instrument(skip(self))]
    pub async fn list_buildings(&self, project_id: ObjectId) -> MeasurementResult<Vec<Building>> {
        self.repository.list_buildings(project_id).await
    }

    /// Create a new element after verifying its parent references
    ///
    /// The building check only runs when a non-blank `building_id` was
    /// supplied; a blank value is stored as-is without gating the insert.
    #[instrument(skip(self, input), fields(element_type = %input.element_type))]
    pub async fn create_element(&self, input: CreateElement) -> MeasurementResult<Element> {
        input
            .validate()
            .map_err(|e| MeasurementError::Validation(e.to_string()))?;

        let project_id = parse_object_id(&input.project_id, "project_id")?;
        if !self.repository.project_exists(project_id).await? {
            return Err(MeasurementError::ParentNotFound("project"));
        }

        if let Some(building_id) = input.building_id.as_deref().filter(|v| !v.is_empty()) {
            let building_id = parse_object_id(building_id, "building_id")?;
            if !self.repository.building_exists(building_id).await? {
                return Err(MeasurementError::ParentNotFound("building"));
            }
        }

        self.repository.create_element(input).await
    }

    /// List a project's elements, optionally narrowed to one building
    #[instrument(skip(self))]
    pub async fn list_elements(
        &self,
        project_id: ObjectId,
        filter: ElementFilter,
    ) -> MeasurementResult<Vec<Element>> {
        if let Some(building_id) = filter.building_id.as_deref().filter(|v| !v.is_empty()) {
            parse_object_id(building_id, "building_id")?;
        }

        self.repository.list_elements(project_id, filter).await
    }

    /// Total element quantities for a project, grouped by (type, configuration)
    #[instrument(skip(self))]
    pub async fn project_summary(&self, project_id: ObjectId) -> MeasurementResult<ProjectSummary> {
        let items = self.repository.summarize_elements(project_id).await?;
        let total = items.iter().map(|group| group.count).sum();

        Ok(ProjectSummary { total, items })
    }

    /// Render all of a project's elements as a CSV document
    #[instrument(skip(self))]
    pub async fn export_elements_csv(&self, project_id: ObjectId) -> MeasurementResult<String> {
        let elements = self
            .repository
            .list_elements(project_id, ElementFilter::default())
            .await?;

        Ok(csv::render(&elements))
    }
}

impl<R: MeasurementRepository> Clone for MeasurementService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ElementType, ProjectType, SummaryGroup};
    use crate::repository::MockMeasurementRepository;
    use mockall::predicate::eq;

    fn create_project_input(name: &str) -> CreateProject {
        CreateProject {
            name: name.to_string(),
            project_type: ProjectType::Autre,
            location: None,
            contact_name: None,
            contact_phone: None,
            photo_url: None,
        }
    }

    fn create_building_input(project_id: &str) -> CreateBuilding {
        CreateBuilding {
            project_id: project_id.to_string(),
            name: "Bâtiment A".to_string(),
            description: None,
        }
    }

    fn create_element_input(project_id: &str) -> CreateElement {
        CreateElement {
            project_id: project_id.to_string(),
            building_id: None,
            element_type: ElementType::Porte,
            configuration: Some("simple".to_string()),
            opening: None,
            height_mm: Some(2100.0),
            width_mm: Some(900.0),
            depth_mm: None,
            thickness_mm: None,
            quantity: 1,
            notes_text: None,
            notes_audio_url: None,
            photo_url: None,
        }
    }

    fn building_from(input: &CreateBuilding) -> Building {
        Building {
            id: ObjectId::new().to_hex(),
            project_id: input.project_id.clone(),
            name: input.name.clone(),
            description: input.description.clone(),
        }
    }

    fn element_from(input: &CreateElement) -> Element {
        Element {
            id: ObjectId::new().to_hex(),
            project_id: input.project_id.clone(),
            building_id: input.building_id.clone(),
            element_type: input.element_type,
            configuration: input.configuration.clone(),
            opening: input.opening,
            height_mm: input.height_mm,
            width_mm: input.width_mm,
            depth_mm: input.depth_mm,
            thickness_mm: input.thickness_mm,
            quantity: input.quantity,
            notes_text: input.notes_text.clone(),
            notes_audio_url: input.notes_audio_url.clone(),
            photo_url: input.photo_url.clone(),
        }
    }

    #[tokio::test]
    async fn test_create_project_rejects_empty_name() {
        let mut mock = MockMeasurementRepository::new();
        mock.expect_create_project().times(0);
        let service = MeasurementService::new(mock);

        let err = service
            .create_project(create_project_input(""))
            .await
            .unwrap_err();

        assert!(matches!(err, MeasurementError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_project_maps_missing_to_not_found() {
        let id = ObjectId::new();
        let mut mock = MockMeasurementRepository::new();
        mock.expect_get_project().with(eq(id)).returning(|_| Ok(None));
        let service = MeasurementService::new(mock);

        let err = service.get_project(id).await.unwrap_err();

        assert_eq!(err.to_string(), "Project not found");
    }

    #[tokio::test]
    async fn test_create_building_rejects_malformed_project_id() {
        let mut mock = MockMeasurementRepository::new();
        mock.expect_project_exists().times(0);
        mock.expect_create_building().times(0);
        let service = MeasurementService::new(mock);

        let err = service
            .create_building(create_building_input("pas-un-identifiant"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid project_id");
    }

    #[tokio::test]
    async fn test_create_building_requires_existing_project() {
        let project_id = ObjectId::new();
        let mut mock = MockMeasurementRepository::new();
        mock.expect_project_exists()
            .with(eq(project_id))
            .returning(|_| Ok(false));
        mock.expect_create_building().times(0);
        let service = MeasurementService::new(mock);

        let err = service
            .create_building(create_building_input(&project_id.to_hex()))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Parent project not found");
    }

    #[tokio::test]
    async fn test_create_building_inserts_after_checks() {
        let project_id = ObjectId::new();
        let mut mock = MockMeasurementRepository::new();
        mock.expect_project_exists()
            .with(eq(project_id))
            .returning(|_| Ok(true));
        mock.expect_create_building()
            .returning(|input| Ok(building_from(&input)));
        let service = MeasurementService::new(mock);

        let created = service
            .create_building(create_building_input(&project_id.to_hex()))
            .await
            .unwrap();

        assert_eq!(created.project_id, project_id.to_hex());
        assert_eq!(created.name, "Bâtiment A");
    }

    #[tokio::test]
    async fn test_create_element_rejects_malformed_project_id() {
        let mut mock = MockMeasurementRepository::new();
        mock.expect_project_exists().times(0);
        mock.expect_create_element().times(0);
        let service = MeasurementService::new(mock);

        let err = service
            .create_element(create_element_input("pas-un-identifiant"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid project_id");
    }

    #[tokio::test]
    async fn test_create_element_requires_existing_building() {
        let project_id = ObjectId::new();
        let building_id = ObjectId::new();
        let mut mock = MockMeasurementRepository::new();
        mock.expect_project_exists()
            .with(eq(project_id))
            .returning(|_| Ok(true));
        mock.expect_building_exists()
            .with(eq(building_id))
            .returning(|_| Ok(false));
        mock.expect_create_element().times(0);
        let service = MeasurementService::new(mock);

        let mut input = create_element_input(&project_id.to_hex());
        input.building_id = Some(building_id.to_hex());

        let err = service.create_element(input).await.unwrap_err();

        assert_eq!(err.to_string(), "Parent building not found");
    }

    #[tokio::test]
    async fn test_create_element_skips_building_check_when_blank() {
        let project_id = ObjectId::new();
        let mut mock = MockMeasurementRepository::new();
        mock.expect_project_exists().returning(|_| Ok(true));
        mock.expect_building_exists().times(0);
        mock.expect_create_element()
            .returning(|input| Ok(element_from(&input)));
        let service = MeasurementService::new(mock);

        let mut input = create_element_input(&project_id.to_hex());
        input.building_id = Some(String::new());

        let created = service.create_element(input).await.unwrap();

        assert_eq!(created.building_id.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_list_elements_rejects_malformed_building_filter() {
        let mut mock = MockMeasurementRepository::new();
        mock.expect_list_elements().times(0);
        let service = MeasurementService::new(mock);

        let filter = ElementFilter {
            building_id: Some("zzz".to_string()),
        };
        let err = service
            .list_elements(ObjectId::new(), filter)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid building_id");
    }

    #[tokio::test]
    async fn test_project_summary_totals_quantities() {
        let mut mock = MockMeasurementRepository::new();
        mock.expect_summarize_elements().returning(|_| {
            Ok(vec![
                SummaryGroup {
                    element_type: ElementType::Porte,
                    configuration: Some("simple".to_string()),
                    count: 5,
                },
                SummaryGroup {
                    element_type: ElementType::Placard,
                    configuration: None,
                    count: 1,
                },
            ])
        });
        let service = MeasurementService::new(mock);

        let summary = service.project_summary(ObjectId::new()).await.unwrap();

        assert_eq!(summary.total, 6);
        assert_eq!(summary.items.len(), 2);
    }

    #[tokio::test]
    async fn test_export_csv_lists_without_building_filter() {
        let mut mock = MockMeasurementRepository::new();
        mock.expect_list_elements()
            .withf(|_, filter| filter.building_id.is_none())
            .returning(|project_id, _| {
                let mut input = create_element_input(&project_id.to_hex());
                input.quantity = 3;
                Ok(vec![element_from(&input)])
            });
        let service = MeasurementService::new(mock);

        let rendered = service
            .export_elements_csv(ObjectId::new())
            .await
            .unwrap();

        assert!(rendered.starts_with(csv::CSV_HEADER));
        assert_eq!(rendered.lines().count(), 2);
        assert!(rendered.lines().nth(1).unwrap().contains(",porte,simple,"));
    }
}
