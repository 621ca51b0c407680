use super::shutdown::{ShutdownCoordinator, coordinated_shutdown, shutdown_signal};
use crate::errors::handlers::not_found;
use crate::http::cors::cors_layer_from_env;
use crate::http::security::security_headers;
use axum::{Json, Router, middleware, routing::get};
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, error, info, warn};
use utoipa::OpenApi;

/// Requests running longer than this are aborted with 408.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Bind and serve `router`, stopping on ctrl-c or SIGTERM.
///
/// The entry point for services with nothing to tear down; use
/// [`create_production_app`] when connections need closing on the way
/// out.
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| error!("Server error: {e:?}"))
}

/// Wrap `apis` with the shared middleware and documentation routes.
///
/// The result serves ReDoc at `/redoc`, RapiDoc at `/rapidoc`, Scalar
/// at `/scalar`, and the raw spec at `/api-docs/openapi.json`, with
/// `apis` merged at the router root. Unknown paths fall through to a
/// JSON 404.
///
/// Each `.layer` call wraps the stack so far, so requests pass through
/// compression, CORS (see [`cors_layer_from_env`]), the timeout,
/// security headers, and tracing, in that order.
///
/// `apis` should arrive with its own state applied; this function only
/// adds cross-cutting concerns.
pub async fn create_router<T>(apis: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};

    let cors = cors_layer_from_env()?;

    Ok(Router::new()
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(T::openapi()) }),
        )
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .merge(apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(cors)
        .layer(CompressionLayer::new()))
}

/// Serve `router` with coordinated shutdown and a bounded cleanup phase.
///
/// On ctrl-c or SIGTERM the listener drains in-flight requests while
/// `cleanup` runs, capped at `shutdown_timeout`. Cleanup is where
/// database clients get dropped so their pools close before the process
/// exits.
///
/// ```ignore
/// create_production_app(app, &config.server, Duration::from_secs(30), async move {
///     drop(mongo_client);
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();
    let cleanup_trigger = coordinator.clone();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    let cleanup_handle = tokio::spawn(async move {
        cleanup_trigger.wait_for_signal().await;

        info!("Running cleanup, capped at {shutdown_timeout:?}");
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(()) => info!("Cleanup finished"),
            Err(_) => warn!("Cleanup did not finish within {shutdown_timeout:?}"),
        }
    });

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(coordinated_shutdown(coordinator))
        .await
        .inspect_err(|e| error!("Server error: {e:?}"));

    cleanup_handle.await.ok();

    serve_result
}
