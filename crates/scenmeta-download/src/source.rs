//! Where archive bytes come from.
//!
//! [`ArchiveSource`] is the port the fetch-and-unpack procedure depends on;
//! [`HttpArchiveSource`] is the production implementation over reqwest.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::error::DownloadError;
use crate::progress::{ProgressCallback, ThrottledProgress};

const USER_AGENT: &str = concat!("scenmeta/", env!("CARGO_PKG_VERSION"));

/// Fetches an archive and writes it verbatim to a local file.
#[async_trait]
pub trait ArchiveSource: Send + Sync {
    /// Write the resource at `url` to `dest`, returning the number of bytes written.
    ///
    /// Implementations may leave a partially written `dest` behind on error;
    /// the caller owns its cleanup.
    async fn fetch_to(
        &self,
        url: &Url,
        dest: &Path,
        progress: Option<&ProgressCallback>,
    ) -> Result<u64, DownloadError>;
}

/// Unauthenticated HTTP(S) GET via reqwest, streamed to disk.
#[derive(Debug, Clone)]
pub struct HttpArchiveSource {
    client: reqwest::Client,
}

impl HttpArchiveSource {
    /// Create a source with a connect timeout and no overall timeout,
    /// since archives can be large.
    pub fn new() -> Result<Self, DownloadError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DownloadError::network("", format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }

    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ArchiveSource for HttpArchiveSource {
    async fn fetch_to(
        &self,
        url: &Url,
        dest: &Path,
        progress: Option<&ProgressCallback>,
    ) -> Result<u64, DownloadError> {
        tracing::debug!(%url, "sending GET");
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| DownloadError::network(url.as_str(), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::network_with_status(
                url.as_str(),
                format!("HTTP {status}"),
                status.as_u16(),
            ));
        }

        let total_size = response.content_length().unwrap_or(0);
        tracing::debug!(%url, total_size, "response received");

        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|e| DownloadError::io(dest, &e))?;

        let mut progress = ThrottledProgress::new(progress);
        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| {
                DownloadError::network(url.as_str(), format!("error reading body: {e}"))
            })?;
            file.write_all(&chunk)
                .await
                .map_err(|e| DownloadError::io(dest, &e))?;
            downloaded += chunk.len() as u64;
            progress.update(downloaded, total_size);
        }

        file.flush().await.map_err(|e| DownloadError::io(dest, &e))?;
        progress.finish(downloaded, total_size);

        if total_size > 0 && downloaded != total_size {
            return Err(DownloadError::network(
                url.as_str(),
                format!("body ended after {downloaded} of {total_size} bytes"),
            ));
        }

        Ok(downloaded)
    }
}
