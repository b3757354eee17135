//! Structured logging.
//!
//! # Responsibilities
//! - Build the sink set: rotating log file + console
//! - Share one formatter and the correlation layer between both sinks
//! - Install the subscriber process-wide, once, before serving
//!
//! # Design Decisions
//! - The file sink rotates daily and keeps `retained_files` old files
//! - File writes go through a non-blocking worker; keep the guard alive
//! - `RUST_LOG` overrides the configured level; request spans stay enabled

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::Dispatch;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::observability::correlation::{CorrelationLayer, REQUEST_SPAN_TARGET};
use crate::observability::format::{CorrelatedFormat, FixedOffsetTime};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open rolling log file: {0}")]
    Appender(#[from] InitError),

    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),

    #[error("logging already initialised: {0}")]
    Install(#[from] tracing::dispatcher::SetGlobalDefaultError),
}

/// Keeps the non-blocking file writer alive; flushes on drop.
#[must_use = "dropping the guard stops the file sink"]
pub struct LoggingGuard {
    _file: WorkerGuard,
}

/// Initialize the process-wide logging subsystem.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard, LoggingError> {
    let appender = file_appender(config)?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let base = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)?,
    };
    let filter = with_request_spans(base)?;

    let dispatch = build_dispatch(config, filter, file_writer, io::stdout);
    tracing::dispatcher::set_global_default(dispatch)?;

    Ok(LoggingGuard { _file: guard })
}

/// Daily rotating appender under `config.dir`.
pub fn file_appender(config: &LoggingConfig) -> Result<RollingFileAppender, LoggingError> {
    std::fs::create_dir_all(&config.dir).map_err(|source| LoggingError::CreateDir {
        path: config.dir.clone(),
        source,
    })?;

    // max_log_files counts the file currently written to.
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(&config.file_name)
        .max_log_files(config.retained_files + 1)
        .build(&config.dir)?;
    Ok(appender)
}

/// Keep request spans enabled whatever the level, so that records which do
/// pass the filter can still find their correlation ID.
pub fn with_request_spans(filter: EnvFilter) -> Result<EnvFilter, LoggingError> {
    Ok(filter.add_directive(format!("{REQUEST_SPAN_TARGET}=trace").parse()?))
}

/// Assemble the subscriber over arbitrary writers.
pub fn build_dispatch<F, C>(config: &LoggingConfig, filter: EnvFilter, file: F, console: C) -> Dispatch
where
    F: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    C: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let timer = FixedOffsetTime::new(config.utc_offset_hours, config.time_format.clone());

    let file_layer = fmt::layer()
        .event_format(CorrelatedFormat::new(timer.clone()))
        .with_writer(file)
        .with_ansi(false);

    let console_layer = fmt::layer()
        .event_format(CorrelatedFormat::new(timer))
        .with_writer(console)
        .with_ansi(false);

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(CorrelationLayer)
        .with(file_layer)
        .with(console_layer);

    Dispatch::new(subscriber)
}
