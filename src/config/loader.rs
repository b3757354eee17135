//! Configuration loading from disk and environment.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Prefix shared by every environment override.
pub const ENV_PREFIX: &str = "XLSX2JSON_";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { key: String, value: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { key, value } => {
                write!(f, "Invalid value '{}' for {}{}", value, ENV_PREFIX, key)
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load the service configuration.
///
/// Reads the TOML file when a path is given (defaults otherwise), applies
/// `XLSX2JSON_*` environment overrides and validates the result.
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => ServiceConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(format!("{ENV_PREFIX}{key}")).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay values from `lookup` (keys without the `XLSX2JSON_` prefix).
pub fn apply_env_overrides<F>(config: &mut ServiceConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("BIND_ADDRESS") {
        config.listener.bind_address = v;
    }
    if let Some(v) = lookup("WORK_DIR") {
        config.storage.work_dir = PathBuf::from(v);
    }
    if let Some(v) = lookup("LOG_DIR") {
        config.logging.dir = PathBuf::from(v);
    }
    if let Some(v) = lookup("LOG_FILE") {
        config.logging.file_name = v;
    }
    if let Some(v) = lookup("LOG_LEVEL") {
        config.logging.level = v;
    }
    if let Some(v) = lookup("DOWNLOAD_TIMEOUT_SECS") {
        config.download.timeout_secs = v.parse().map_err(|_| ConfigError::Env {
            key: "DOWNLOAD_TIMEOUT_SECS".to_string(),
            value: v.clone(),
        })?;
    }
    if let Some(v) = lookup("METRICS_ADDRESS") {
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = v;
    }
    Ok(())
}
