//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// Base URL of the text-generation service, without a trailing slash.
    pub generation_base_url: String,
    pub frontend_origin: String,
    pub storage_path: PathBuf,
    pub connect_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // --- Server Settings ---
        let bind_address_str =
            lookup("BIND_ADDRESS").unwrap_or_else(|| "127.0.0.1:3001".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let frontend_origin =
            lookup("FRONTEND_ORIGIN").unwrap_or_else(|| "http://localhost:5173".to_string());

        // --- Generation Service Settings ---
        let base_url =
            lookup("COPYGEN_BASE_URL").unwrap_or_else(|| "http://localhost:8000".to_string());
        let generation_base_url = base_url.trim().trim_end_matches('/').to_string();
        if !generation_base_url.starts_with("http://") && !generation_base_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidValue(
                "COPYGEN_BASE_URL".to_string(),
                format!("'{}' is not an http(s) URL", base_url),
            ));
        }

        let connect_timeout_secs = match lookup("CONNECT_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidValue("CONNECT_TIMEOUT_SECS".to_string(), e.to_string())
            })?,
            None => 10,
        };

        // --- History Storage ---
        let storage_path = match lookup("STORAGE_PATH") {
            Some(path) => PathBuf::from(path),
            None => dirs::data_dir()
                .map(|dir| dir.join("copygen").join("storage.json"))
                .ok_or_else(|| ConfigError::MissingVar("STORAGE_PATH".to_string()))?,
        };

        Ok(Self {
            bind_address,
            log_level,
            generation_base_url,
            frontend_origin,
            storage_path,
            connect_timeout: Duration::from_secs(connect_timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_point_at_the_local_service() {
        let config = config_from(&[("STORAGE_PATH", "/tmp/copygen.json")]).unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:3001".parse::<SocketAddr>().unwrap());
        assert_eq!(config.generation_base_url, "http://localhost:8000");
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.storage_path, PathBuf::from("/tmp/copygen.json"));
    }

    #[test]
    fn trailing_slashes_are_dropped_from_the_base_url() {
        let config = config_from(&[
            ("STORAGE_PATH", "/tmp/copygen.json"),
            ("COPYGEN_BASE_URL", "http://gpu-box:8000//"),
        ])
        .unwrap();
        assert_eq!(config.generation_base_url, "http://gpu-box:8000");
    }

    #[test]
    fn bad_values_are_reported_by_name() {
        let err = config_from(&[("STORAGE_PATH", "x"), ("RUST_LOG", "chatty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref var, _) if var == "RUST_LOG"));

        let err = config_from(&[("STORAGE_PATH", "x"), ("BIND_ADDRESS", "nowhere")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref var, _) if var == "BIND_ADDRESS"));

        let err = config_from(&[("STORAGE_PATH", "x"), ("COPYGEN_BASE_URL", "ftp://host")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref var, _) if var == "COPYGEN_BASE_URL"));

        let err = config_from(&[("STORAGE_PATH", "x"), ("CONNECT_TIMEOUT_SECS", "soon")])
            .unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue(ref var, _) if var == "CONNECT_TIMEOUT_SECS")
        );
    }
}
