use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeasurementError {
    #[error("Invalid {0}")]
    InvalidIdentifier(&'static str),

    #[error("Parent {0} not found")]
    ParentNotFound(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type MeasurementResult<T> = Result<T, MeasurementError>;

/// Convert MeasurementError to AppError for standardized error responses
impl From<MeasurementError> for AppError {
    fn from(err: MeasurementError) -> Self {
        match err {
            MeasurementError::InvalidIdentifier(field) => {
                AppError::InvalidIdentifier(field.to_string())
            }
            MeasurementError::ParentNotFound(parent) => {
                AppError::NotFound(format!("Parent {} not found", parent))
            }
            MeasurementError::NotFound(resource) => {
                AppError::NotFound(format!("{} not found", resource))
            }
            MeasurementError::Validation(msg) => AppError::BadRequest(msg),
            MeasurementError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for MeasurementError {
    fn into_response(self) -> Response {
        // Convert to AppError for the standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for MeasurementError {
    fn from(err: mongodb::error::Error) -> Self {
        MeasurementError::Database(err.to_string())
    }
}
