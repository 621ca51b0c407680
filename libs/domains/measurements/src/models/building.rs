use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::MeasurementError;

/// Building as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Building {
    /// Unique identifier (hex form of the stored `_id`)
    pub id: String,
    /// Identifier of the owning project
    pub project_id: String,
    pub name: String,
    pub description: Option<String>,
}

/// Building document as stored in MongoDB
///
/// `project_id` is persisted as the parent's hex string, so building queries
/// filter on plain string equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub project_id: String,
    pub name: String,
    pub description: Option<String>,
}

/// DTO for creating a new building
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBuilding {
    #[validate(length(min = 1))]
    pub project_id: String,
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
}

impl From<CreateBuilding> for BuildingDocument {
    fn from(input: CreateBuilding) -> Self {
        Self {
            id: None,
            project_id: input.project_id,
            name: input.name,
            description: input.description,
        }
    }
}

impl TryFrom<BuildingDocument> for Building {
    type Error = MeasurementError;

    fn try_from(doc: BuildingDocument) -> Result<Self, Self::Error> {
        let id = doc
            .id
            .ok_or_else(|| MeasurementError::Database("building document missing _id".to_string()))?;
        Ok(Self {
            id: id.to_hex(),
            project_id: doc.project_id,
            name: doc.name,
            description: doc.description,
        })
    }
}
