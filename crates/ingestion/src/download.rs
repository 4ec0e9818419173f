//! GRIB2 download from the upstream archive.
//!
//! A single GET per run, streamed straight to disk. No resumption and no
//! retries: a failed fetch fails the run.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, StatusCode};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument, warn};

use crate::error::DownloadError;

/// NOMADS rejects clients without a browser-like agent.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// Anything smaller is an error page or an unpublished cycle, not a GRIB file.
pub const DEFAULT_MIN_BYTES: u64 = 10_000;

/// Fetches a URL into a local file, returning the number of bytes written.
#[async_trait]
pub trait GribFetcher: Send + Sync {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64, DownloadError>;
}

/// Configuration for [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Upper bound on the whole download, headers and body
    pub timeout: Duration,
    /// Connection establishment timeout
    pub connect_timeout: Duration,
    /// Smallest plausible body size
    pub min_bytes: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(300),
            connect_timeout: Duration::from_secs(30),
            min_bytes: DEFAULT_MIN_BYTES,
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

/// [`GribFetcher`] over HTTP(S) with reqwest.
pub struct HttpFetcher {
    client: Client,
    config: FetchConfig,
}

impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .tcp_nodelay(true)
            .build()
            .map_err(|e| DownloadError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    async fn download(&self, url: &str, dest: &Path) -> Result<u64, DownloadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_reqwest(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(DownloadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body: body.chars().take(100).collect(),
            });
        }

        let mut file = File::create(dest).await?;
        let mut stream = response.bytes_stream();
        let mut written = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| self.map_reqwest(e))?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }

        file.flush().await?;
        file.sync_all().await?;

        debug!(bytes = written, path = %dest.display(), "Response body written");

        if written < self.config.min_bytes {
            fs::remove_file(dest).await.ok();
            return Err(DownloadError::TooSmall {
                size: written,
                min: self.config.min_bytes,
            });
        }

        Ok(written)
    }

    fn map_reqwest(&self, e: reqwest::Error) -> DownloadError {
        if e.is_timeout() {
            DownloadError::Timeout(self.config.timeout.as_secs())
        } else {
            DownloadError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl GribFetcher for HttpFetcher {
    #[instrument(skip(self, dest), fields(url = %url))]
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64, DownloadError> {
        info!("Starting download");

        let result = tokio::time::timeout(self.config.timeout, self.download(url, dest))
            .await
            .unwrap_or(Err(DownloadError::Timeout(self.config.timeout.as_secs())));

        match &result {
            Ok(bytes) => info!(bytes = bytes, "Download completed"),
            Err(e) => warn!(error = %e, "Download failed"),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FetchConfig::default();
        assert_eq!(config.min_bytes, 10_000);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_client_builds() {
        let fetcher = HttpFetcher::new(FetchConfig::default()).unwrap();
        assert_eq!(fetcher.config().min_bytes, DEFAULT_MIN_BYTES);
    }
}
