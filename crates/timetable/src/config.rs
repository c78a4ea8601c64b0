/// Runtime configuration, read from the environment (optionally via a `.env` file)
use std::collections::HashMap;
use std::env;
use thiserror::Error;

pub const DB_PATH_VAR: &str = "TIMETABLE_DB_PATH";
pub const HOST_VAR: &str = "TIMETABLE_HOST";
pub const PORT_VAR: &str = "TIMETABLE_PORT";

const DEFAULT_DB_PATH: &str = "timetable.sqlite3";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a port number, got '{value}'")]
    InvalidPort { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Path of the SQLite database file
    pub db_path: String,
    pub host: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is normal in production.
        dotenv::dotenv().ok();
        Self::from_vars(env::vars().collect())
    }

    /// Builds the configuration from an explicit set of variables.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let non_empty = |key: &str| vars.get(key).filter(|v| !v.trim().is_empty()).cloned();

        let port = match non_empty(PORT_VAR) {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort {
                    var: PORT_VAR,
                    value,
                })?,
            None => defaults.port,
        };

        Ok(Self {
            db_path: non_empty(DB_PATH_VAR).unwrap_or(defaults.db_path),
            host: non_empty(HOST_VAR).unwrap_or(defaults.host),
            port,
        })
    }

    /// Host and port to bind. The host may be an IP literal or a name to resolve.
    pub fn listen_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_vars(HashMap::new()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.listen_addr(), ("127.0.0.1", 5000));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_vars(vars(&[
            (DB_PATH_VAR, "/var/lib/timetable/db.sqlite3"),
            (HOST_VAR, "0.0.0.0"),
            (PORT_VAR, "8080"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, "/var/lib/timetable/db.sqlite3");
        assert_eq!(config.listen_addr(), ("0.0.0.0", 8080));
    }

    #[test]
    fn test_invalid_port() {
        let err = AppConfig::from_vars(vars(&[(PORT_VAR, "http")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidPort {
                var: PORT_VAR,
                value: "http".into()
            }
        );
    }

    #[tokio::test]
    async fn test_hostname_resolves() {
        let config =
            AppConfig::from_vars(vars(&[(HOST_VAR, "localhost"), (PORT_VAR, "0")])).unwrap();
        assert_eq!(config.listen_addr(), ("localhost", 0));

        let listener = tokio::net::TcpListener::bind(config.listen_addr())
            .await
            .unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }
}
