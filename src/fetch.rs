//! Document fetching over HTTP with retry and timeout.

use std::time::Duration;

use crate::error::FetchError;
use crate::retry::{retry_if, RetryConfig};

/// Browser-like identification; the origin rejects default client strings.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Read-only document retrieval.
///
/// The pipeline only depends on this trait, so tests can substitute a stub
/// that serves canned HTML.
pub trait Fetch {
    /// Retrieve the document at `url` as text.
    fn fetch(&self, url: &str) -> impl std::future::Future<Output = Result<String, FetchError>> + Send;
}

/// HTTP fetcher with a bounded per-request timeout and exponential backoff
/// on transient failures (429/5xx, timeouts, connect errors).
pub struct HttpFetcher {
    client: reqwest::Client,
    retry: RetryConfig,
}

impl HttpFetcher {
    /// Build a fetcher with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            retry: RetryConfig::network(),
        })
    }

    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        retry_if(
            &self.retry,
            url,
            || self.fetch_once(url),
            FetchError::is_retryable,
        )
        .await
    }
}
