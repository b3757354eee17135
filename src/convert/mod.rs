//! The conversion pipeline: download → persist → parse.
//!
//! # Data Flow
//! ```text
//! file_url
//!     → download.rs (GET, 200 required)
//!     → storage::TempArtifact (unique file in the working directory)
//!     → workbook (first sheet → row records, on the blocking pool)
//!     → Vec<Row>
//! The artifact is dropped, and its file removed, before `convert` returns.
//! ```

pub mod download;
pub mod error;

use std::path::PathBuf;
use std::time::Instant;

use crate::storage::TempArtifact;
use crate::workbook::{self, Row};

pub use download::Downloader;
pub use error::ConvertError;

/// Runs one conversion; shared by all requests.
#[derive(Debug, Clone)]
pub struct Converter {
    downloader: Downloader,
    work_dir: PathBuf,
}

impl Converter {
    pub fn new(downloader: Downloader, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            downloader,
            work_dir: work_dir.into(),
        }
    }

    pub async fn convert(&self, file_url: &str) -> Result<Vec<Row>, ConvertError> {
        tracing::info!("Downloading source file");
        let download_started = Instant::now();
        let body = self.downloader.fetch(file_url).await?;
        tracing::info!(
            bytes = body.len(),
            elapsed = %format!("{:.2}s", download_started.elapsed().as_secs_f64()),
            "Download complete"
        );

        let artifact = TempArtifact::persist(&self.work_dir, &body).await?;
        drop(body);
        tracing::info!(path = %artifact.path().display(), "Temporary file saved");

        let path = artifact.path().to_path_buf();
        let rows = tokio::task::spawn_blocking(move || workbook::read_records(&path)).await??;
        tracing::info!(rows = rows.len(), "Workbook parsed");

        Ok(rows)
    }
}
