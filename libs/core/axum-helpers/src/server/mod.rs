//! Server assembly: router construction, the liveness endpoint, and
//! shutdown coordination.
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::app_info;
//!
//! let router = create_router::<ApiDoc>(api_routes).await?;
//! let app = router.merge(health_router(app_info!()));
//!
//! create_production_app(app, &config.server, timeout, cleanup).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_app, create_production_app, create_router};
pub use health::{HealthResponse, health_router};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
