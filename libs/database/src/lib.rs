//! Connection plumbing for the MongoDB-backed services.
//!
//! # Features
//!
//! - `mongodb` (default) - the connector, health probes, and driver re-exports
//! - `config` - `core_config::FromEnv` support for `MongoConfig`
//!
//! ```ignore
//! use database::mongodb;
//!
//! let client = mongodb::connect_with_retry("mongodb://localhost:27017", None).await?;
//! let db = client.database("measurement_db");
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
