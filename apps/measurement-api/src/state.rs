//! Shared application state.

use mongodb::{Client, Database};

/// State handed to every request handler.
///
/// Cloning is inexpensive: the MongoDB client shares its underlying
/// connection pool across clones.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client, kept around for health checks and shutdown
    pub mongo_client: Client,
    /// Handle to the measurement database
    pub db: Database,
}
