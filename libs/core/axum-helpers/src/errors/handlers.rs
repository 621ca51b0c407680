use super::AppError;
use axum::response::{IntoResponse, Response};

/// Fallback for requests matching no route, wired in by `create_router`.
pub async fn not_found() -> Response {
    AppError::NotFound("The requested resource was not found".to_string()).into_response()
}
