//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the conversion service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address, request limits).
    pub listener: ListenerConfig,

    /// Working directory for downloaded spreadsheets.
    pub storage: StorageConfig,

    /// Outbound download settings.
    pub download: DownloadConfig,

    /// Log sinks and formatting.
    pub logging: LoggingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,

    /// Maximum accepted request body size in bytes.
    pub max_request_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            max_request_body_bytes: 64 * 1024,
        }
    }
}

/// Storage for transient artifacts.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory that receives one temporary file per in-flight request.
    pub work_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("./output"),
        }
    }
}

/// Outbound download configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Total time allowed for one download in seconds (0 = no limit).
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds (0 = no limit).
    pub connect_timeout_secs: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 300,
            connect_timeout_secs: 10,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory holding the active log file and its rotated backups.
    pub dir: PathBuf,

    /// Log file name; rotated files get a `.YYYY-MM-DD` suffix.
    pub file_name: String,

    /// Number of rotated files kept besides the active one.
    pub retained_files: usize,

    /// Default filter directive (trace, debug, info, warn, error).
    /// `RUST_LOG` takes precedence when set.
    pub level: String,

    /// strftime pattern for the timestamp column.
    pub time_format: String,

    /// Fixed hour offset added to UTC before rendering timestamps.
    pub utc_offset_hours: i64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./logs"),
            file_name: "xlsx2json.log".to_string(),
            retained_files: 7,
            level: "info".to_string(),
            time_format: "%Y-%m-%d %H:%M:%S".to_string(),
            utc_offset_hours: 8,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
