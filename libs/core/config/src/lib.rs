pub mod server;
pub mod tracing;

use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable '{0}'")]
    MissingEnvVar(String),

    #[error("Invalid value for environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Where the process is running, as declared by `APP_ENV`.
///
/// Only `production` (any casing) is recognized; everything else,
/// including an unset variable, counts as development. The distinction
/// drives log formatting and similar toggles, nothing security-relevant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        match env::var("APP_ENV") {
            Ok(value) if value.eq_ignore_ascii_case("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Static application identity, used for health endpoints and startup logs.
///
/// Build one with [`app_info!`] so the name and version come from the
/// calling crate's Cargo metadata.
#[derive(Clone, Copy, Debug)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Construct an [`AppInfo`] from the calling crate's Cargo metadata.
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

/// Settings that know how to assemble themselves from the environment.
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Read `key`, or substitute `default` when it is unset.
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read `key`, or fail with [`ConfigError::MissingEnvVar`].
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_app_env_is_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();

            assert!(env.is_development());
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_production_recognized_in_any_casing() {
        for spelling in ["production", "PRODUCTION", "Production"] {
            temp_env::with_var("APP_ENV", Some(spelling), || {
                assert_eq!(Environment::from_env(), Environment::Production);
            });
        }
    }

    #[test]
    fn test_unrecognized_app_env_is_development() {
        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_env_or_default_prefers_set_value() {
        temp_env::with_var("TEST_VAR", Some("from_env"), || {
            assert_eq!(env_or_default("TEST_VAR", "fallback"), "from_env");
        });

        temp_env::with_var_unset("TEST_VAR", || {
            assert_eq!(env_or_default("TEST_VAR", "fallback"), "fallback");
        });
    }

    #[test]
    fn test_env_required_reads_value() {
        temp_env::with_var("REQUIRED_VAR", Some("present"), || {
            assert_eq!(env_required("REQUIRED_VAR").unwrap(), "present");
        });
    }

    #[test]
    fn test_env_required_names_the_missing_variable() {
        temp_env::with_var_unset("REQUIRED_VAR", || {
            let err = env_required("REQUIRED_VAR").unwrap_err();
            let message = err.to_string();

            assert!(message.contains("REQUIRED_VAR"));
            assert!(message.contains("required"));
        });
    }

    #[test]
    fn test_app_info_macro_uses_cargo_metadata() {
        let info = app_info!();

        assert_eq!(info.name, "core_config");
        assert!(!info.version.is_empty());
    }
}
