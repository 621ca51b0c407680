use axum::{Json, Router, routing::get};
use core_config::AppInfo;
use serde::Serialize;

/// Payload of the liveness endpoint.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

/// Router answering `GET /health` with the process identity.
///
/// Liveness only: it answers 200 whenever the process is serving requests
/// and never probes dependencies. Readiness endpoints belong to the
/// application, which knows what it depends on.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::health_router;
/// use core_config::app_info;
///
/// let app = Router::new()
///     .merge(health_router(app_info!()))
///     .merge(api_routes);
/// ```
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new().route(
        "/health",
        get(move || async move {
            Json(HealthResponse {
                status: "healthy",
                name: app_info.name,
                version: app_info.version,
            })
        }),
    )
}
