//! Conversion failures.

use std::io;

use thiserror::Error;

use crate::workbook::WorkbookError;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// The source URL answered with something other than 200.
    #[error("{url} download failed: upstream responded with status {status}")]
    UpstreamStatus { url: String, status: u16 },

    #[error("invalid file url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error(transparent)]
    Download(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Workbook(#[from] WorkbookError),

    #[error("spreadsheet parser stopped unexpectedly: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl ConvertError {
    /// Whether the caller supplied a URL that could not be fetched
    /// successfully, as opposed to a failure on this side.
    pub fn is_upstream(&self) -> bool {
        matches!(self, ConvertError::UpstreamStatus { .. })
    }

    /// The error followed by its sources, joined with `": "`.
    pub fn describe(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            let text = err.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = err.source();
        }
        message
    }
}
