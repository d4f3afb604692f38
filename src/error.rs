//! Error taxonomy for the scraper.
//!
//! Four families with distinct propagation rules: `ConfigError` aborts before
//! any work starts, `FetchError` is retried up to the fetcher's budget and
//! then surfaced, `ParseFailure` degrades a single field or record, and
//! `StoreError` is fatal for the run at schema time and fatal for one record
//! at upsert time.

use thiserror::Error;

/// Pre-flight configuration failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required settings are absent from the environment.
    #[error("missing required settings: {}", .0.join(", "))]
    Missing(Vec<String>),

    /// The reference timezone name is not a known IANA zone.
    #[error("unknown reference timezone: {0:?}")]
    Timezone(String),

    /// A numeric setting could not be parsed.
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: String, value: String },
}

/// Network retrieval failure, after the retry budget is spent.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Non-success HTTP status.
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Transport-level failure (DNS, connect, timeout, body read).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// Whether the fetcher should spend retry budget on this failure.
    ///
    /// Transient statuses and timeouts/connect errors are retryable; any
    /// other 4xx surfaces immediately.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Status { status, .. } => {
                matches!(*status, 429 | 500 | 502 | 503 | 504)
            }
            FetchError::Transport { source, .. } => {
                source.is_timeout() || source.is_connect() || source.is_request()
            }
        }
    }
}

/// Malformed or absent markup, or unparseable date text.
///
/// Never fatal for the run: the owning field degrades to a sentinel or the
/// record is stored without a canonical instant.
#[derive(Debug, Error)]
pub enum ParseFailure {
    #[error("expected markup node missing: {0}")]
    MissingNode(&'static str),

    #[error("unparseable date text: {0:?}")]
    Date(String),
}

/// Store connection, schema or write failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("could not create database directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode roster as JSON: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Run-fatal failure from the pipeline orchestrator.
///
/// Per-record failures never become a `RunError`; they are logged and counted
/// at the record boundary.
#[derive(Debug, Error)]
pub enum RunError {
    /// The top-level listing fetch failed.
    #[error("listing fetch failed: {0}")]
    Listing(#[from] FetchError),

    /// Schema setup failed before any record was processed.
    #[error("schema setup failed: {0}")]
    Schema(#[from] StoreError),
}
