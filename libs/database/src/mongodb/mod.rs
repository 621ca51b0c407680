//! MongoDB connection management.
//!
//! Builds configured clients with startup retry, plus the health probes
//! used by readiness endpoints.

mod config;
mod connector;
mod health;

pub use config::MongoConfig;
pub use connector::{
    connect, connect_from_config, connect_from_config_with_retry, connect_with_retry,
};
pub use health::{HealthStatus, check_health, check_health_detailed};

// Callers get the driver types without depending on the driver directly
pub use mongodb::{Client, Collection, Database};
