//! Measurements Domain
//!
//! This module provides the complete domain implementation for construction
//! measurement projects backed by MongoDB: projects contain buildings, which
//! contain measured elements (doors, closets, dressings). It covers creation
//! with parent-existence checks, listing, quantity summaries, and CSV export.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, referential-integrity checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_measurements::{
//!     handlers,
//!     mongodb::MongoMeasurementRepository,
//!     service::MeasurementService,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a MongoDB client
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("measurements");
//!
//! // Create a repository and service
//! let repository = MongoMeasurementRepository::new(db);
//! let service = MeasurementService::new(repository);
//!
//! // Create Axum router
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod csv;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{MeasurementError, MeasurementResult};
pub use handlers::ApiDoc;
pub use models::{
    Building, CreateBuilding, CreateElement, CreateProject, Element, ElementFilter, ElementType,
    Opening, Project, ProjectSummary, ProjectType, SummaryGroup,
};
pub use mongodb::MongoMeasurementRepository;
pub use repository::MeasurementRepository;
pub use service::MeasurementService;
