use crate::{ConfigError, FromEnv, env_or_default};
use std::net::Ipv4Addr;

const DEFAULT_PORT: u16 = 8000;

/// Bind address for the HTTP listener.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self { host, port }
    }

    /// `host:port`, the form `TcpListener::bind` accepts.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl FromEnv for ServerConfig {
    /// `HOST` (default all interfaces) and `PORT` (default 8000).
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("HOST", &Ipv4Addr::UNSPECIFIED.to_string());

        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|e| ConfigError::ParseError {
                key: "PORT".to_string(),
                details: format!("{e}"),
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self { host, port })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_defaults_bind_all_interfaces() {
        temp_env::with_vars([("HOST", None::<&str>), ("PORT", None)], || {
            let config = ServerConfig::from_env().unwrap();

            assert_eq!(config.address(), "0.0.0.0:8000");
        });
    }

    #[test]
    fn test_from_env_reads_both_variables() {
        temp_env::with_vars([("HOST", Some("127.0.0.1")), ("PORT", Some("3000"))], || {
            let config = ServerConfig::from_env().unwrap();

            assert_eq!(config.host, "127.0.0.1");
            assert_eq!(config.port, 3000);
            assert_eq!(config.address(), "127.0.0.1:3000");
        });
    }

    #[test]
    fn test_from_env_port_overridable_alone() {
        temp_env::with_vars([("HOST", None::<&str>), ("PORT", Some("9000"))], || {
            let config = ServerConfig::from_env().unwrap();

            assert_eq!(config.host, "0.0.0.0");
            assert_eq!(config.port, 9000);
        });
    }

    #[test]
    fn test_from_env_rejects_non_numeric_port() {
        temp_env::with_var("PORT", Some("not_a_number"), || {
            let err = ServerConfig::from_env().unwrap_err();

            assert!(err.to_string().contains("PORT"));
        });
    }

    #[test]
    fn test_from_env_rejects_port_above_u16() {
        temp_env::with_var("PORT", Some("99999"), || {
            assert!(ServerConfig::from_env().is_err());
        });
    }

    #[test]
    fn test_address_joins_host_and_port() {
        let config = ServerConfig::new("localhost".to_string(), 8080);

        assert_eq!(config.address(), "localhost:8080");
    }

    #[test]
    fn test_default_matches_from_env_defaults() {
        let config = ServerConfig::default();

        assert_eq!(config.host, Ipv4Addr::UNSPECIFIED.to_string());
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
