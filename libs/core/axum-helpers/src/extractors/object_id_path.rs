//! ObjectId path parameter extractor with automatic validation.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use bson::oid::ObjectId;
use std::collections::HashMap;

/// Extractor for MongoDB ObjectId path parameters.
///
/// Parses the path parameter of the matched route as an ObjectId and
/// rejects with a 400 response naming the parameter (e.g. "Invalid
/// project_id") before any handler or store code runs.
///
/// Routes using this extractor must declare exactly one path parameter.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::extractors::ObjectIdPath;
///
/// async fn get_project(ObjectIdPath(id): ObjectIdPath) -> String {
///     format!("Project ID: {}", id.to_hex())
/// }
///
/// let app = Router::new().route("/projects/{project_id}", get(get_project));
/// ```
pub struct ObjectIdPath(pub ObjectId);

impl<S> FromRequestParts<S> for ObjectIdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        let (name, value) = match params.iter().next() {
            Some(entry) => entry,
            None => {
                return Err(AppError::InternalServerError(
                    "route declares no path parameters".to_string(),
                )
                .into_response());
            }
        };

        match ObjectId::parse_str(value) {
            Ok(id) => Ok(ObjectIdPath(id)),
            Err(_) => Err(AppError::InvalidIdentifier(name.clone()).into_response()),
        }
    }
}
