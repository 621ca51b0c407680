use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, prelude::*};

/// Install the color-eyre panic and error hooks.
///
/// Call before anything fallible in `main`. Shows the file and line an
/// error came from, skips the environment dump. Repeat installs are
/// ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

fn default_filter(environment: &Environment) -> EnvFilter {
    match environment {
        Environment::Production => EnvFilter::new("info,tower_http=info"),
        Environment::Development => EnvFilter::new("debug"),
    }
}

/// Set up the global subscriber for `environment`.
///
/// Production emits flattened JSON lines for the log aggregator,
/// development a pretty human-readable format. Both attach an
/// `ErrorLayer` so eyre reports carry span traces, and `RUST_LOG`
/// overrides the level defaults when set.
///
/// Calling again once a subscriber exists is a no-op, which keeps
/// tests that share a process happy.
pub fn init_tracing(environment: &Environment) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(environment));

    let result = match environment {
        Environment::Production => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init(),
        Environment::Development => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init(),
    };

    match result {
        Ok(()) => info!("Tracing initialized for {environment:?}"),
        Err(_) => debug!("Tracing already initialized"),
    }
}
