//! Entities and DTOs for the measurement domain
//!
//! Each entity comes in two shapes: a `*Document` struct matching the raw
//! MongoDB document (store-assigned `_id`), and an API record exposing the
//! identifier as a plain hex string. Cross-references between entities
//! (`project_id`, `building_id`) are stored as hex strings, so the conversion
//! to [`mongodb::bson::oid::ObjectId`] happens only at the request boundary.

pub mod building;
pub mod element;
pub mod project;

pub use building::{Building, BuildingDocument, CreateBuilding};
pub use element::{
    CreateElement, Element, ElementDocument, ElementFilter, ElementType, Opening, ProjectSummary,
    SummaryGroup,
};
pub use project::{CreateProject, Project, ProjectDocument, ProjectType};

use mongodb::bson::oid::ObjectId;

use crate::error::{MeasurementError, MeasurementResult};

/// Parse a caller-supplied identifier, naming the offending field on failure.
///
/// Identifiers are format-checked before any lookup; a malformed value is a
/// client error, never a store error.
pub fn parse_object_id(value: &str, field: &'static str) -> MeasurementResult<ObjectId> {
    ObjectId::parse_str(value).map_err(|_| MeasurementError::InvalidIdentifier(field))
}
