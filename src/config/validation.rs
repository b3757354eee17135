//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, value ranges and log formatting patterns
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use chrono::format::{Item, StrftimeItems};
use tracing_subscriber::EnvFilter;

use crate::config::schema::ServiceConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `logging.time_format`.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check every semantic constraint and collect all violations.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.listener.max_request_body_bytes == 0 {
        errors.push(ValidationError::new(
            "listener.max_request_body_bytes",
            "must be greater than zero",
        ));
    }

    if config.storage.work_dir.as_os_str().is_empty() {
        errors.push(ValidationError::new("storage.work_dir", "must not be empty"));
    }

    let logging = &config.logging;
    if logging.file_name.is_empty()
        || logging.file_name.contains('/')
        || logging.file_name.contains('\\')
    {
        errors.push(ValidationError::new(
            "logging.file_name",
            format!("'{}' must be a bare file name", logging.file_name),
        ));
    }

    if logging.retained_files == 0 {
        errors.push(ValidationError::new(
            "logging.retained_files",
            "must keep at least one rotated file",
        ));
    }

    if StrftimeItems::new(&logging.time_format).any(|item| matches!(item, Item::Error)) {
        errors.push(ValidationError::new(
            "logging.time_format",
            format!("'{}' is not a valid strftime pattern", logging.time_format),
        ));
    }

    if !(-23..=23).contains(&logging.utc_offset_hours) {
        errors.push(ValidationError::new(
            "logging.utc_offset_hours",
            format!("{} is outside -23..=23", logging.utc_offset_hours),
        ));
    }

    if let Err(e) = EnvFilter::try_new(&logging.level) {
        errors.push(ValidationError::new(
            "logging.level",
            format!("'{}' is not a filter directive: {}", logging.level, e),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "'{}' is not a socket address",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
