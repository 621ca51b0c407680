//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Validates the request body using the `validator` crate's `Validate` trait.
/// Returns structured validation errors if validation fails.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateProject {
///     #[validate(length(min = 1))]
///     name: String,
/// }
///
/// async fn create_project(ValidatedJson(payload): ValidatedJson<CreateProject>) -> String {
///     format!("Creating project: {}", payload.name)
/// }
///
/// let app = Router::new().route("/projects", post(create_project));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::JsonExtractorRejection(e).into_response())?;

        data.validate()
            .map_err(|e| AppError::ValidationError(e).into_response())?;

        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::post,
    };
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct CreateThing {
        #[validate(length(min = 1))]
        name: String,

        #[validate(range(min = 1))]
        quantity: i64,
    }

    async fn create_thing(ValidatedJson(payload): ValidatedJson<CreateThing>) -> String {
        format!("{}:{}", payload.name, payload.quantity)
    }

    fn app() -> Router {
        Router::new().route("/things", post(create_thing))
    }

    fn post_json(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/things")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_payload_passes() {
        let response = app()
            .oneshot(post_json(serde_json::json!({"name": "door", "quantity": 2})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_payload_returns_field_errors() {
        let response = app()
            .oneshot(post_json(serde_json::json!({"name": "", "quantity": 0})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert!(body["details"]["name"].is_array());
        assert!(body["details"]["quantity"].is_array());
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let request = Request::builder()
            .method("POST")
            .uri("/things")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "JSON_EXTRACTION");
    }
}
