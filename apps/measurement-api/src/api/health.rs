//! Health check and connectivity diagnostics endpoints

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::state::AppState;

/// How many collection names the diagnostics report lists at most.
const COLLECTION_PREVIEW_LIMIT: usize = 10;

/// How many characters of a driver error the diagnostics report keeps.
const ERROR_PREVIEW_LEN: usize = 50;

#[derive(Serialize)]
struct ReadinessResponse {
    status: String,
    mongodb: bool,
}

/// Snapshot of the MongoDB link and its environment wiring.
#[derive(Serialize)]
struct ConnectivityReport {
    backend: &'static str,
    database: String,
    database_url: &'static str,
    database_name: &'static str,
    connection_status: &'static str,
    response_time_ms: u64,
    collections: Vec<String>,
}

/// Create a health check router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/test", get(connectivity_report))
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Liveness message for load balancers and manual checks
async fn root() -> Json<Value> {
    Json(json!({ "message": "Measurement Management API is running" }))
}

/// Readiness check - verifies MongoDB connection, 503 when it is down
async fn readiness_check(State(state): State<AppState>) -> Response {
    let mongodb_healthy = database::mongodb::check_health(&state.mongo_client).await;

    let status_code = if mongodb_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = ReadinessResponse {
        status: if mongodb_healthy {
            "ready"
        } else {
            "unhealthy"
        }
        .to_string(),
        mongodb: mongodb_healthy,
    };

    (status_code, Json(body)).into_response()
}

/// Connectivity diagnostics - reports server ping, collection names,
/// and whether the expected environment variables are visible
async fn connectivity_report(State(state): State<AppState>) -> Json<ConnectivityReport> {
    let health = database::mongodb::check_health_detailed(&state.mongo_client).await;

    let mut report = ConnectivityReport {
        backend: "running",
        database: "not available".to_string(),
        database_url: env_flag("DATABASE_URL"),
        database_name: env_flag("DATABASE_NAME"),
        connection_status: "not connected",
        response_time_ms: health.response_time_ms,
        collections: Vec::new(),
    };

    if health.healthy {
        report.connection_status = "connected";

        match state.db.list_collection_names().await {
            Ok(names) => {
                report.collections = names
                    .into_iter()
                    .take(COLLECTION_PREVIEW_LIMIT)
                    .collect();
                report.database = "connected and working".to_string();
            }
            Err(e) => {
                report.database = format!(
                    "connected but error: {}",
                    truncate_message(&e.to_string(), ERROR_PREVIEW_LEN)
                );
            }
        }
    } else {
        let message = health.message.as_deref().unwrap_or("unknown");
        report.database = format!("error: {}", truncate_message(message, ERROR_PREVIEW_LEN));
    }

    Json(report)
}

fn env_flag(key: &str) -> &'static str {
    if std::env::var(key).is_ok_and(|v| !v.is_empty()) {
        "set"
    } else {
        "not set"
    }
}

/// Cap a diagnostic message without splitting a UTF-8 character.
fn truncate_message(message: &str, limit: usize) -> &str {
    match message.char_indices().nth(limit) {
        Some((boundary, _)) => &message[..boundary],
        None => message,
    }
}
