use mongodb::{Client, options::ClientOptions};
use std::time::Duration;
use tracing::info;

use super::MongoConfig;
use crate::common::{DatabaseError, DatabaseResult, RetryConfig, retry, retry_with_backoff};

/// Open a client for `config` and verify the server answers.
///
/// Pool sizes and timeouts come from the config. The connection is
/// confirmed with a `listDatabases` round trip before the client is
/// handed out, so a bad URL fails here rather than on first use.
///
/// ```ignore
/// use core_config::FromEnv;
/// use database::mongodb::{MongoConfig, connect_from_config};
///
/// let config = MongoConfig::from_env()?;
/// let client = connect_from_config(&config).await?;
/// ```
pub async fn connect_from_config(config: &MongoConfig) -> DatabaseResult<Client> {
    info!("Connecting to MongoDB at {}", config.url);

    let mut options = ClientOptions::parse(&config.url).await?;
    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(app_name) = &config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client = Client::with_options(options)?;

    client
        .list_database_names()
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!("MongoDB connection established");
    Ok(client)
}

/// Connect by URL alone, with default pool settings.
///
/// ```ignore
/// use database::mongodb::connect;
///
/// let client = connect("mongodb://localhost:27017").await?;
/// let db = client.database("measurements");
/// ```
pub async fn connect(url: &str) -> DatabaseResult<Client> {
    connect_from_config(&MongoConfig::new(url)).await
}

/// [`connect`] wrapped in exponential backoff.
///
/// `None` uses the default budget (3 retries starting at 100ms).
pub async fn connect_with_retry(
    url: &str,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<Client> {
    let url = url.to_string();

    match retry_config {
        Some(budget) => retry_with_backoff(|| connect(&url), budget).await,
        None => retry(|| connect(&url)).await,
    }
}

/// [`connect_from_config`] wrapped in exponential backoff.
///
/// The usual startup call when the store may come up after the API does:
///
/// ```ignore
/// let client = connect_from_config_with_retry(&config.mongodb, None).await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: &MongoConfig,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<Client> {
    match retry_config {
        Some(budget) => retry_with_backoff(|| connect_from_config(config), budget).await,
        None => retry(|| connect_from_config(config)).await,
    }
}
