//! xlsx2json service
//!
//! # Architecture Overview
//!
//! ```text
//!     POST /xlsx2json {"file_url"}
//!         │
//!         ▼
//!     ┌──────────┐    ┌───────────┐    ┌──────────┐    ┌───────────┐
//!     │   http   │───▶│  convert  │───▶│ storage  │───▶│ workbook  │
//!     │ request  │    │ download  │    │ temp file│    │ calamine  │
//!     └──────────┘    └───────────┘    └──────────┘    └───────────┘
//!         ▲                                                  │
//!         └──────────────── rows_as_dict ◀───────────────────┘
//!
//!     Cross-cutting: config, observability (request-tagged logs,
//!     metrics), lifecycle (startup, signals, graceful shutdown)
//! ```

use std::path::PathBuf;

use clap::Parser;

use xlsx2json::config::load_config;
use xlsx2json::lifecycle::{self, signals, Shutdown};
use xlsx2json::observability::init_logging;

#[derive(Parser)]
#[command(name = "xlsx2json")]
#[command(about = "Convert remote spreadsheets to JSON rows over HTTP", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long, env = "XLSX2JSON_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    // Flushes buffered log lines on drop.
    let _log_guard = init_logging(&config.logging)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "xlsx2json starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        work_dir = %config.storage.work_dir.display(),
        log_dir = %config.logging.dir.display(),
        download_timeout_secs = config.download.timeout_secs,
        metrics_enabled = config.observability.metrics_enabled,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    if let Err(e) = lifecycle::serve(config, shutdown.subscribe()).await {
        tracing::error!(error = %e, "Startup failed");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
