use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::MeasurementResult;
use crate::models::{
    Building, CreateBuilding, CreateElement, CreateProject, Element, ElementFilter, Project,
    SummaryGroup,
};

/// Repository trait for measurement persistence
///
/// Covers the three collections behind the API (projects, buildings,
/// elements). Implementations can use different storage backends (MongoDB,
/// etc.); callers are expected to have format-checked identifiers already.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MeasurementRepository: Send + Sync {
    /// Insert a new project and return it as re-read from the store
    async fn create_project(&self, input: CreateProject) -> MeasurementResult<Project>;

    /// Get a project by ID
    async fn get_project(&self, id: ObjectId) -> MeasurementResult<Option<Project>>;

    /// List all projects
    async fn list_projects(&self) -> MeasurementResult<Vec<Project>>;

    /// Check whether a project exists
    async fn project_exists(&self, id: ObjectId) -> MeasurementResult<bool>;

    /// Insert a new building and return it as re-read from the store
    async fn create_building(&self, input: CreateBuilding) -> MeasurementResult<Building>;

    /// List the buildings belonging to a project
    async fn list_buildings(&self, project_id: ObjectId) -> MeasurementResult<Vec<Building>>;

    /// Check whether a building exists
    async fn building_exists(&self, id: ObjectId) -> MeasurementResult<bool>;

    /// Insert a new element and return it as re-read from the store
    async fn create_element(&self, input: CreateElement) -> MeasurementResult<Element>;

    /// List a project's elements, optionally narrowed by filter
    async fn list_elements(
        &self,
        project_id: ObjectId,
        filter: ElementFilter,
    ) -> MeasurementResult<Vec<Element>>;

    /// Group a project's elements by (type, configuration), summing quantities
    async fn summarize_elements(
        &self,
        project_id: ObjectId,
    ) -> MeasurementResult<Vec<SummaryGroup>>;
}
