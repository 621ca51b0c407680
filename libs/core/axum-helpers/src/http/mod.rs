//! HTTP-level middleware: CORS policies and security headers.
//!
//! `create_router` applies both; these exports exist for apps that
//! assemble their own stacks.

pub mod cors;
pub mod security;

pub use cors::{cors_layer_from_env, create_cors_layer, create_permissive_cors_layer};
pub use security::security_headers;
