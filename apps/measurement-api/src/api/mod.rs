//! Route assembly for the measurement backend.

pub mod health;
pub mod measurements;

use axum::Router;

use crate::state::AppState;

/// All service routes, ready to hand to `axum_helpers::create_router`,
/// which merges them at the router root.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(measurements::router(state))
        .merge(health::router(state.clone()))
}
