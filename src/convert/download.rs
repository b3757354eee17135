//! Outbound spreadsheet download.

use std::time::Duration;

use axum::body::Bytes;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::config::DownloadConfig;
use crate::convert::error::ConvertError;

/// HTTP client for fetching caller-supplied spreadsheet URLs.
///
/// One GET per request, no retries.
#[derive(Debug, Clone)]
pub struct Downloader {
    client: Client,
}

impl Downloader {
    pub fn new(config: &DownloadConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        if config.connect_timeout_secs > 0 {
            builder = builder.connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Fetch the full body of `file_url`. Anything but `200 OK` is an
    /// upstream failure and the body is not read.
    pub async fn fetch(&self, file_url: &str) -> Result<Bytes, ConvertError> {
        let url = Url::parse(file_url).map_err(|e| ConvertError::InvalidUrl {
            url: file_url.to_string(),
            reason: e.to_string(),
        })?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            tracing::error!(status = status.as_u16(), "File download failed");
            return Err(ConvertError::UpstreamStatus {
                url: file_url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?)
    }
}
