use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::MeasurementError;

/// Kind of measured element
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ElementType {
    Porte,
    Placard,
    Dressing,
}

/// Opening direction, only meaningful for doors
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Opening {
    Poussant,
    Tirant,
}

/// Element as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Element {
    /// Unique identifier (hex form of the stored `_id`)
    pub id: String,
    /// Identifier of the owning project
    pub project_id: String,
    /// Identifier of the owning building, when assigned to one
    pub building_id: Option<String>,
    pub element_type: ElementType,
    pub configuration: Option<String>,
    pub opening: Option<Opening>,
    pub height_mm: Option<f64>,
    pub width_mm: Option<f64>,
    pub depth_mm: Option<f64>,
    pub thickness_mm: Option<f64>,
    pub quantity: i64,
    pub notes_text: Option<String>,
    pub notes_audio_url: Option<String>,
    pub photo_url: Option<String>,
}

/// Element document as stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub project_id: String,
    pub building_id: Option<String>,
    pub element_type: ElementType,
    pub configuration: Option<String>,
    pub opening: Option<Opening>,
    pub height_mm: Option<f64>,
    pub width_mm: Option<f64>,
    pub depth_mm: Option<f64>,
    pub thickness_mm: Option<f64>,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    pub notes_text: Option<String>,
    pub notes_audio_url: Option<String>,
    pub photo_url: Option<String>,
}

/// DTO for creating a new element
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateElement {
    #[validate(length(min = 1))]
    pub project_id: String,
    pub building_id: Option<String>,
    pub element_type: ElementType,
    pub configuration: Option<String>,
    pub opening: Option<Opening>,
    #[validate(range(min = 0.0))]
    pub height_mm: Option<f64>,
    #[validate(range(min = 0.0))]
    pub width_mm: Option<f64>,
    #[validate(range(min = 0.0))]
    pub depth_mm: Option<f64>,
    #[validate(range(min = 0.0))]
    pub thickness_mm: Option<f64>,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1))]
    pub quantity: i64,
    pub notes_text: Option<String>,
    pub notes_audio_url: Option<String>,
    pub photo_url: Option<String>,
}

/// Query filter for listing a project's elements
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct ElementFilter {
    /// Restrict results to the elements of a single building
    pub building_id: Option<String>,
}

/// One aggregation group: elements sharing a (type, configuration) pair
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SummaryGroup {
    pub element_type: ElementType,
    /// Reported as null for elements grouped without a configuration
    pub configuration: Option<String>,
    /// Sum of `quantity` over the group
    pub count: i64,
}

/// Quantity totals for one project, grouped by (type, configuration)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectSummary {
    pub total: i64,
    pub items: Vec<SummaryGroup>,
}

fn default_quantity() -> i64 {
    1
}

impl From<CreateElement> for ElementDocument {
    fn from(input: CreateElement) -> Self {
        Self {
            id: None,
            project_id: input.project_id,
            building_id: input.building_id,
            element_type: input.element_type,
            configuration: input.configuration,
            opening: input.opening,
            height_mm: input.height_mm,
            width_mm: input.width_mm,
            depth_mm: input.depth_mm,
            thickness_mm: input.thickness_mm,
            quantity: input.quantity,
            notes_text: input.notes_text,
            notes_audio_url: input.notes_audio_url,
            photo_url: input.photo_url,
        }
    }
}

impl TryFrom<ElementDocument> for Element {
    type Error = MeasurementError;

    fn try_from(doc: ElementDocument) -> Result<Self, Self::Error> {
        let id = doc
            .id
            .ok_or_else(|| MeasurementError::Database("element document missing _id".to_string()))?;
        Ok(Self {
            id: id.to_hex(),
            project_id: doc.project_id,
            building_id: doc.building_id,
            element_type: doc.element_type,
            configuration: doc.configuration,
            opening: doc.opening,
            height_mm: doc.height_mm,
            width_mm: doc.width_mm,
            depth_mm: doc.depth_mm,
            thickness_mm: doc.thickness_mm,
            quantity: doc.quantity,
            notes_text: doc.notes_text,
            notes_audio_url: doc.notes_audio_url,
            photo_url: doc.photo_url,
        })
    }
}
