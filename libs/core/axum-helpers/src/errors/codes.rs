//! The error code registry.
//!
//! Each code pairs a SCREAMING_SNAKE_CASE identifier for clients with a
//! numeric code for dashboards and a fallback message. Handlers reach
//! for these through [`super::AppError`]; the registry keeps the wire
//! values in one place.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
//! assert_eq!(ErrorCode::NotFound.code(), 1004);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stable identifiers for everything the API can fail with.
///
/// Numbering: 1000s for request handling, 4000s for I/O, 5000s for
/// serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A field in the request body failed validation
    ValidationError,

    /// A path or body identifier is not a valid ObjectId
    InvalidObjectId,

    /// The request body could not be read as JSON of the expected shape
    JsonExtraction,

    /// The addressed resource does not exist
    NotFound,

    /// Unexpected server-side failure
    InternalError,

    /// A dependency (usually the database) is unreachable
    ServiceUnavailable,

    /// Filesystem or socket error
    IoError,

    /// JSON serialization failed server-side
    SerdeJsonError,
}

impl ErrorCode {
    const fn def(&self) -> (&'static str, i32, &'static str) {
        match self {
            Self::ValidationError => ("VALIDATION_ERROR", 1001, "Request validation failed"),
            Self::InvalidObjectId => ("INVALID_OBJECT_ID", 1002, "Invalid identifier format"),
            Self::JsonExtraction => ("JSON_EXTRACTION", 1003, "Failed to parse request body"),
            Self::NotFound => ("NOT_FOUND", 1004, "Resource not found"),
            Self::InternalError => ("INTERNAL_ERROR", 1005, "An internal server error occurred"),
            Self::ServiceUnavailable => (
                "SERVICE_UNAVAILABLE",
                1011,
                "Service is temporarily unavailable",
            ),
            Self::IoError => ("IO_ERROR", 4001, "I/O error occurred"),
            Self::SerdeJsonError => ("SERDE_JSON_ERROR", 5001, "JSON serialization error"),
        }
    }

    /// Identifier clients branch on, e.g. `"VALIDATION_ERROR"`.
    pub fn as_str(&self) -> &'static str {
        self.def().0
    }

    /// Numeric code carried in logs and the response envelope.
    pub fn code(&self) -> i32 {
        self.def().1
    }

    /// Message used when the caller has nothing more specific to say.
    pub fn default_message(&self) -> &'static str {
        self.def().2
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
