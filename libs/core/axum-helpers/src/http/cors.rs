use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(3600);

fn strict_layer(origins: AllowOrigin) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true)
        .max_age(PREFLIGHT_MAX_AGE)
}

/// Strict CORS for a single origin: the usual REST methods, JSON and
/// auth headers, credentials on, preflight cached for an hour.
pub fn create_cors_layer(allowed_origin: HeaderValue) -> CorsLayer {
    strict_layer(AllowOrigin::exact(allowed_origin))
}

/// Mirrors the request origin and allows any method and header.
/// Development only.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// CORS policy from `CORS_ALLOWED_ORIGIN`.
///
/// When set, the variable is read as a comma-separated origin list and
/// produces the strict layer. When unset, browsers get the permissive
/// mirror instead. An empty list or an origin that does not parse as a
/// header value is a startup error.
pub fn cors_layer_from_env() -> io::Result<CorsLayer> {
    let Ok(raw) = std::env::var("CORS_ALLOWED_ORIGIN") else {
        info!("CORS_ALLOWED_ORIGIN not set, mirroring any request origin");
        return Ok(create_permissive_cors_layer());
    };

    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {e}"),
            )
        })?;

    if origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN is set but names no origins",
        ));
    }

    info!("CORS restricted to: {raw}");
    Ok(strict_layer(AllowOrigin::list(origins)))
}
