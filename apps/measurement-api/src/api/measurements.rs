//! Wires the measurements domain to HTTP.

use axum::Router;
use domain_measurements::{MeasurementService, MongoMeasurementRepository, handlers};
use tracing::info;

use crate::state::AppState;

/// Repository over the configured database, service on top, routes on
/// top of that.
pub fn router(state: &AppState) -> Router {
    let repository = MongoMeasurementRepository::new(state.db.clone());
    let service = MeasurementService::new(repository);

    handlers::router(service)
}

/// Ensure the measurement collections have their indexes before the
/// first request arrives.
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    MongoMeasurementRepository::new(db.clone())
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create measurement indexes: {e}"))?;

    info!("Measurement collection indexes created");
    Ok(())
}
