use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::MeasurementError;

/// Project category. The wire values are the French labels already present
/// in stored documents, accents included.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
pub enum ProjectType {
    Immeuble,
    #[serde(rename = "Résidence")]
    #[strum(serialize = "Résidence")]
    Residence,
    Villa,
    #[serde(rename = "École")]
    #[strum(serialize = "École")]
    Ecole,
    #[serde(rename = "Hôtel")]
    #[strum(serialize = "Hôtel")]
    Hotel,
    #[default]
    Autre,
}

/// Project as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Project {
    /// Unique identifier (hex form of the stored `_id`)
    pub id: String,
    pub name: String,
    pub project_type: ProjectType,
    pub location: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub photo_url: Option<String>,
}

/// Project document as stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(default)]
    pub project_type: ProjectType,
    pub location: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub photo_url: Option<String>,
}

/// DTO for creating a new project
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProject {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub project_type: ProjectType,
    pub location: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub photo_url: Option<String>,
}

impl From<CreateProject> for ProjectDocument {
    fn from(input: CreateProject) -> Self {
        Self {
            id: None,
            name: input.name,
            project_type: input.project_type,
            location: input.location,
            contact_name: input.contact_name,
            contact_phone: input.contact_phone,
            photo_url: input.photo_url,
        }
    }
}

impl TryFrom<ProjectDocument> for Project {
    type Error = MeasurementError;

    fn try_from(doc: ProjectDocument) -> Result<Self, Self::Error> {
        let id = doc
            .id
            .ok_or_else(|| MeasurementError::Database("project document missing _id".to_string()))?;
        Ok(Self {
            id: id.to_hex(),
            name: doc.name,
            project_type: doc.project_type,
            location: doc.location,
            contact_name: doc.contact_name,
            contact_phone: doc.contact_phone,
            photo_url: doc.photo_url,
        })
    }
}
