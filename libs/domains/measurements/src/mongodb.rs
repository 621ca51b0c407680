//! MongoDB implementation of MeasurementRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc, from_document, oid::ObjectId},
    options::IndexOptions,
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{MeasurementError, MeasurementResult};
use crate::models::{
    Building, BuildingDocument, CreateBuilding, CreateElement, CreateProject, Element,
    ElementDocument, ElementFilter, ElementType, Project, ProjectDocument, SummaryGroup,
};
use crate::repository::MeasurementRepository;

const PROJECT_COLLECTION: &str = "project";
const BUILDING_COLLECTION: &str = "building";
const ELEMENT_COLLECTION: &str = "element";

/// MongoDB implementation of the MeasurementRepository
///
/// Spans the three collections of the measurement hierarchy. Parent
/// references (`project_id`, `building_id`) are stored as hex strings, so
/// list queries match on plain string equality while `_id` lookups use
/// [`ObjectId`].
pub struct MongoMeasurementRepository {
    projects: Collection<ProjectDocument>,
    buildings: Collection<BuildingDocument>,
    elements: Collection<ElementDocument>,
}

impl MongoMeasurementRepository {
    /// Create a new MongoMeasurementRepository over the default collections
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let db = client.database("measurements");
    /// let repo = MongoMeasurementRepository::new(db);
    /// ```
    pub fn new(db: Database) -> Self {
        Self {
            projects: db.collection(PROJECT_COLLECTION),
            buildings: db.collection(BUILDING_COLLECTION),
            elements: db.collection(ELEMENT_COLLECTION),
        }
    }

    /// Initialize the indexes backing the per-project list and summary queries
    pub async fn init_indexes(&self) -> MeasurementResult<()> {
        self.buildings
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "project_id": 1 })
                    .options(
                        IndexOptions::builder()
                            .name("idx_project_id".to_string())
                            .build(),
                    )
                    .build(),
            )
            .await?;

        self.elements
            .create_indexes(vec![
                IndexModel::builder()
                    .keys(doc! { "project_id": 1 })
                    .options(
                        IndexOptions::builder()
                            .name("idx_project_id".to_string())
                            .build(),
                    )
                    .build(),
                IndexModel::builder()
                    .keys(doc! { "project_id": 1, "building_id": 1 })
                    .options(
                        IndexOptions::builder()
                            .name("idx_project_building".to_string())
                            .build(),
                    )
                    .build(),
            ])
            .await?;

        Ok(())
    }

    /// Build the element list query from the optional building filter
    ///
    /// An empty `building_id` is treated as absent, matching how the query
    /// parameter arrives when the field is left blank.
    fn build_element_filter(project_id: ObjectId, filter: &ElementFilter) -> Document {
        let mut query = doc! { "project_id": project_id.to_hex() };

        if let Some(building_id) = filter.building_id.as_deref().filter(|v| !v.is_empty()) {
            query.insert("building_id", building_id);
        }

        query
    }
}

/// One `$group` row of the summary pipeline
#[derive(Debug, Deserialize)]
struct SummaryRow {
    #[serde(rename = "_id")]
    key: SummaryKey,
    count: i64,
}

#[derive(Debug, Deserialize)]
struct SummaryKey {
    #[serde(rename = "type")]
    element_type: ElementType,
    #[serde(default)]
    config: Option<String>,
}

#[async_trait]
impl MeasurementRepository for MongoMeasurementRepository {
    #[instrument(skip(self, input), fields(project_name = %input.name))]
    async fn create_project(&self, input: CreateProject) -> MeasurementResult<Project> {
        let document = ProjectDocument::from(input);
        let result = self.projects.insert_one(&document).await?;
        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            MeasurementError::Database("insert returned a non-ObjectId identifier".to_string())
        })?;

        let created = self
            .projects
            .find_one(doc! { "_id": id })
            .await?
            .ok_or_else(|| {
                MeasurementError::Database(format!("inserted project {} not found on re-read", id))
            })?;

        created.try_into()
    }

    #[instrument(skip(self))]
    async fn get_project(&self, id: ObjectId) -> MeasurementResult<Option<Project>> {
        let found = self.projects.find_one(doc! { "_id": id }).await?;
        found.map(Project::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list_projects(&self) -> MeasurementResult<Vec<Project>> {
        let cursor = self.projects.find(doc! {}).await?;
        let documents: Vec<ProjectDocument> = cursor.try_collect().await?;

        documents.into_iter().map(Project::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn project_exists(&self, id: ObjectId) -> MeasurementResult<bool> {
        let found = self.projects.find_one(doc! { "_id": id }).await?;
        Ok(found.is_some())
    }

    #[instrument(skip(self, input), fields(building_name = %input.name))]
    async fn create_building(&self, input: CreateBuilding) -> MeasurementResult<Building> {
        let document = BuildingDocument::from(input);
        let result = self.buildings.insert_one(&document).await?;
        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            MeasurementError::Database("insert returned a non-ObjectId identifier".to_string())
        })?;

        let created = self
            .buildings
            .find_one(doc! { "_id": id })
            .await?
            .ok_or_else(|| {
                MeasurementError::Database(format!("inserted building {} not found on re-read", id))
            })?;

        created.try_into()
    }

    #[instrument(skip(self))]
    async fn list_buildings(&self, project_id: ObjectId) -> MeasurementResult<Vec<Building>> {
        let cursor = self
            .buildings
            .find(doc! { "project_id": project_id.to_hex() })
            .await?;
        let documents: Vec<BuildingDocument> = cursor.try_collect().await?;

        documents.into_iter().map(Building::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn building_exists(&self, id: ObjectId) -> MeasurementResult<bool> {
        let found = self.buildings.find_one(doc! { "_id": id }).await?;
        Ok(found.is_some())
    }

    #[instrument(skip(self, input), fields(element_type = %input.element_type))]
    async fn create_element(&self, input: CreateElement) -> MeasurementResult<Element> {
        let document = ElementDocument::from(input);
        let result = self.elements.insert_one(&document).await?;
        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            MeasurementError::Database("insert returned a non-ObjectId identifier".to_string())
        })?;

        let created = self
            .elements
            .find_one(doc! { "_id": id })
            .await?
            .ok_or_else(|| {
                MeasurementError::Database(format!("inserted element {} not found on re-read", id))
            })?;

        created.try_into()
    }

    #[instrument(skip(self))]
    async fn list_elements(
        &self,
        project_id: ObjectId,
        filter: ElementFilter,
    ) -> MeasurementResult<Vec<Element>> {
        let query = Self::build_element_filter(project_id, &filter);
        let cursor = self.elements.find(query).await?;
        let documents: Vec<ElementDocument> = cursor.try_collect().await?;

        documents.into_iter().map(Element::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn summarize_elements(
        &self,
        project_id: ObjectId,
    ) -> MeasurementResult<Vec<SummaryGroup>> {
        let pipeline = vec![
            doc! { "$match": { "project_id": project_id.to_hex() } },
            doc! { "$group": {
                "_id": { "type": "$element_type", "config": "$configuration" },
                "count": { "$sum": "$quantity" },
            }},
        ];

        let mut cursor = self.elements.aggregate(pipeline).await?;
        let mut groups = Vec::new();

        while let Some(row) = cursor.try_next().await? {
            let row: SummaryRow =
                from_document(row).map_err(|e| MeasurementError::Database(e.to_string()))?;
            groups.push(SummaryGroup {
                element_type: row.key.element_type,
                configuration: row.key.config,
                count: row.count,
            });
        }

        Ok(groups)
    }
}
