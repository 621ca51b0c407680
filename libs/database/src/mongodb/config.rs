#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv};

/// Connection settings for a MongoDB deployment.
///
/// Built manually in tests and tools, or loaded from the environment in
/// services (the `config` feature adds `core_config::FromEnv`).
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "measurement_db")
///     .with_app_name("measurement-api");
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// Connection string, `mongodb://[user:pass@]host[:port][/?options]`
    pub url: String,

    /// Database the service operates on
    pub database: String,

    /// Name reported to the server for its connection logs
    pub app_name: Option<String>,

    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connect_timeout_secs: u64,
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    /// Config for `url` with default pool sizing and the placeholder database.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Config for `url` operating on `database`.
    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            ..Self::new(url)
        }
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

impl Default for MongoConfig {
    /// Local development: unauthenticated localhost, 5-100 pooled connections.
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            database: "default".to_string(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }
}

#[cfg(feature = "config")]
fn parsed_var<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Environment variables:
/// - `DATABASE_URL` / `MONGODB_URL` (required) - connection string
/// - `DATABASE_NAME` / `MONGODB_DATABASE` (required) - database name
/// - `MONGODB_APP_NAME` - name reported to the server
/// - `MONGODB_MAX_POOL_SIZE` (default 100)
/// - `MONGODB_MIN_POOL_SIZE` (default 5)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (default 10)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (default 30)
///
/// The `DATABASE_*` spellings win when both are set.
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("MONGODB_URL"))
            .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL or MONGODB_URL".to_string()))?;

        let database = std::env::var("DATABASE_NAME")
            .or_else(|_| std::env::var("MONGODB_DATABASE"))
            .map_err(|_| {
                ConfigError::MissingEnvVar("DATABASE_NAME or MONGODB_DATABASE".to_string())
            })?;

        Ok(Self {
            url,
            database,
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            max_pool_size: parsed_var("MONGODB_MAX_POOL_SIZE", 100)?,
            min_pool_size: parsed_var("MONGODB_MIN_POOL_SIZE", 5)?,
            connect_timeout_secs: parsed_var("MONGODB_CONNECT_TIMEOUT_SECS", 10)?,
            server_selection_timeout_secs: parsed_var(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                30,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_default_pool_sizing() {
        let config = MongoConfig::new("mongodb://db:27017");

        assert_eq!(config.url(), "mongodb://db:27017");
        assert_eq!(config.database(), "default");
        assert_eq!(config.max_pool_size, 100);
        assert_eq!(config.min_pool_size, 5);
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.server_selection_timeout_secs, 30);
    }

    #[test]
    fn test_with_database_overrides_placeholder() {
        let config = MongoConfig::with_database("mongodb://db:27017", "measurement_db");

        assert_eq!(config.url(), "mongodb://db:27017");
        assert_eq!(config.database(), "measurement_db");
    }

    #[test]
    fn test_app_name_builder() {
        let config = MongoConfig::new("mongodb://db:27017").with_app_name("measurement-api");

        assert_eq!(config.app_name.as_deref(), Some("measurement-api"));
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_env_reads_primary_spellings() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("mongodb://primary:27017")),
                ("DATABASE_NAME", Some("measurement_db")),
                ("MONGODB_URL", Some("mongodb://ignored:27017")),
                ("MONGODB_DATABASE", Some("ignored")),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();

                assert_eq!(config.url, "mongodb://primary:27017");
                assert_eq!(config.database, "measurement_db");
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_env_falls_back_to_mongodb_spellings() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", None),
                ("DATABASE_NAME", None),
                ("MONGODB_URL", Some("mongodb://fallback:27017")),
                ("MONGODB_DATABASE", Some("fallback_db")),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();

                assert_eq!(config.url, "mongodb://fallback:27017");
                assert_eq!(config.database, "fallback_db");
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_env_requires_a_url() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", None),
                ("MONGODB_URL", None),
                ("DATABASE_NAME", Some("measurement_db")),
            ],
            || {
                let err = MongoConfig::from_env().unwrap_err();

                assert!(err.to_string().contains("DATABASE_URL"));
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_env_rejects_unparsable_pool_size() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("mongodb://db:27017")),
                ("DATABASE_NAME", Some("measurement_db")),
                ("MONGODB_MAX_POOL_SIZE", Some("lots")),
            ],
            || {
                let err = MongoConfig::from_env().unwrap_err();

                assert!(err.to_string().contains("MONGODB_MAX_POOL_SIZE"));
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_env_applies_pool_overrides() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("mongodb://db:27017")),
                ("DATABASE_NAME", Some("measurement_db")),
                ("MONGODB_MAX_POOL_SIZE", Some("20")),
                ("MONGODB_MIN_POOL_SIZE", Some("2")),
                ("MONGODB_CONNECT_TIMEOUT_SECS", Some("5")),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();

                assert_eq!(config.max_pool_size, 20);
                assert_eq!(config.min_pool_size, 2);
                assert_eq!(config.connect_timeout_secs, 5);
                assert_eq!(config.server_selection_timeout_secs, 30);
            },
        );
    }
}
