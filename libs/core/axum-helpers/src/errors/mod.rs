pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Envelope every error leaves the API in.
///
/// ```json
/// {
///   "code": 1004,
///   "error": "NOT_FOUND",
///   "message": "Project not found"
/// }
/// ```
///
/// `details` appears only when there is structured payload to attach,
/// such as per-field validation errors.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Numeric code for logs and monitoring
    pub code: i32,
    /// Machine-readable identifier, e.g. "VALIDATION_ERROR"
    pub error: String,
    /// Human-readable description
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Everything a handler can fail with.
///
/// Converting into a response picks the status, the [`ErrorCode`], and
/// the client-visible message; the `#[from]` variants let handlers use
/// `?` on rejections and library errors directly.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON parsing error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Invalid {0}")]
    InvalidIdentifier(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let log_line = self.to_string();

        let (status, code, message, details) = match self {
            AppError::SerdeJson(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::SerdeJsonError,
                ErrorCode::SerdeJsonError.default_message().to_string(),
                None,
            ),
            AppError::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::IoError,
                ErrorCode::IoError.default_message().to_string(),
                None,
            ),
            // The rejection already knows whether the body was malformed
            // syntax (400) or well-formed JSON of the wrong shape (422)
            AppError::JsonExtractorRejection(e) => {
                (e.status(), ErrorCode::JsonExtraction, e.body_text(), None)
            }
            AppError::ValidationError(e) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::ValidationError,
                ErrorCode::ValidationError.default_message().to_string(),
                serde_json::to_value(&e).ok(),
            ),
            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::ValidationError,
                message,
                None,
            ),
            AppError::InvalidIdentifier(field) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidObjectId,
                format!("Invalid {field}"),
                None,
            ),
            AppError::NotFound(message) => {
                (StatusCode::NOT_FOUND, ErrorCode::NotFound, message, None)
            }
            AppError::InternalServerError(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalError,
                message,
                None,
            ),
            AppError::ServiceUnavailable(message) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::ServiceUnavailable,
                message,
                None,
            ),
        };

        if status.is_server_error() {
            tracing::error!(error_code = code.code(), "{log_line}");
        } else {
            tracing::info!(error_code = code.code(), "{log_line}");
        }

        let body = Json(ErrorResponse {
            code: code.code(),
            error: code.as_str().to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}
