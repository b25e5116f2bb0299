//! Streaming feed-file fetcher and per-file outcome reporting
//!
//! The fetcher resolves a manifest-relative filename against the feed base
//! URL and writes the response body verbatim to the output directory.
//! Writes are whole-file overwrites with no atomic rename; a failure
//! mid-write leaves a truncated file behind, exactly like the feed's other
//! consumers tolerate.
//!
//! Individual fetch failures are never raised out of the pipeline. The
//! orchestrator converts them into [`FetchReport`] entries so partial-feed
//! ingestion is observable without log inspection.

use async_trait::async_trait;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::config::ResolvedFeed;
use crate::error::{Error, Result};

/// Transport seam for retrieving feed files by manifest-relative name
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch `filename` relative to the feed base URL and persist it under
    /// the output directory, creating any directories the name implies.
    async fn fetch(&self, filename: &str) -> Result<()>;
}

/// reqwest-backed fetcher streaming response bodies straight to disk
pub struct HttpFetcher {
    client: reqwest::Client,
    feed: ResolvedFeed,
}

impl HttpFetcher {
    /// Build a fetcher for the given resolved feed.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(feed: ResolvedFeed) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(feed.download_timeout)
            .build()?;
        Ok(Self { client, feed })
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, filename: &str) -> Result<()> {
        let uri = format!("{}{}", self.feed.base_url, filename);
        let dest = self.feed.output_dir.join(filename);
        // Manifest filenames may carry subdirectory segments
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tracing::info!(
            namespace = %self.feed.namespace,
            url = %uri,
            path = %dest.display(),
            "downloading feed file"
        );

        let response = self.client.get(&uri).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url: uri,
            });
        }

        let mut file = tokio::fs::File::create(&dest).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?).await?;
        }
        file.flush().await?;
        Ok(())
    }
}

/// One failed fetch, recorded instead of raised
#[derive(Debug)]
pub struct FetchFailure {
    /// Manifest-relative filename that failed to fetch
    pub filename: String,
    /// Underlying cause
    pub error: Error,
}

/// Aggregated per-file fetch outcomes for a single run
#[derive(Debug, Default)]
pub struct FetchReport {
    /// Filenames fetched and persisted successfully, in fetch order
    pub fetched: Vec<String>,
    /// Fetches that failed; the corresponding files are simply absent from
    /// the output directory (or truncated, if the failure hit mid-write)
    pub failed: Vec<FetchFailure>,
}

impl FetchReport {
    /// True when every attempted fetch succeeded
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
