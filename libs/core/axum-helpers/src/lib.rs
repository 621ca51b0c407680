//! Shared plumbing for the Axum services: router assembly with OpenAPI
//! documentation, the error envelope, validating extractors, CORS and
//! security middleware, and graceful shutdown.
//!
//! The usual service wires up as:
//!
//! ```ignore
//! use axum_helpers::{create_production_app, create_router, health_router};
//! use core_config::app_info;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! struct ApiDoc;
//!
//! let app = create_router::<ApiDoc>(api_routes)
//!     .await?
//!     .merge(health_router(app_info!()));
//!
//! create_production_app(app, &config.server, shutdown_timeout, cleanup).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthResponse, ShutdownCoordinator, create_app, create_production_app, create_router,
    health_router, shutdown_signal,
};

pub use http::{
    cors_layer_from_env, create_cors_layer, create_permissive_cors_layer, security_headers,
};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{ObjectIdPath, ValidatedJson};
