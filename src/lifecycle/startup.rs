//! Startup orchestration.
//!
//! # Responsibilities
//! - Create the working directory
//! - Start the optional metrics endpoint
//! - Bind the listener last, so traffic only arrives when ready
//!
//! Logging is initialised by the caller before any of this runs.
//! Any startup error is fatal.

use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::http::{HttpServer, ServerError};
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to create working directory {path}: {source}")]
    WorkDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid metrics address {0}")]
    MetricsAddress(String),

    #[error("failed to start metrics endpoint: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Server(#[from] ServerError),
}

/// Create the working directory if it does not exist yet.
pub fn prepare_work_dir(path: &Path) -> Result<(), StartupError> {
    std::fs::create_dir_all(path).map_err(|source| StartupError::WorkDir {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "Working directory ready");
    Ok(())
}

/// Bring the service up and serve until `shutdown` fires.
pub async fn serve(config: ServiceConfig, shutdown: ShutdownSignal) -> Result<(), StartupError> {
    prepare_work_dir(&config.storage.work_dir)?;

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::MetricsAddress(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let address = config.listener.bind_address.clone();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown).await?;
    Ok(())
}
