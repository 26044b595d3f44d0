//! Error types for bounded-fetch
//!
//! Two layers of errors exist:
//! - [`Error`] for engine-level failures (invalid configuration, HTTP client construction).
//!   These are the only errors a caller of the pipeline can observe.
//! - [`FetchError`] for per-task failures. The executor propagates these with `?` and maps
//!   them at its boundary into the `FAILED` reason of a [`TaskResult`](crate::types::TaskResult).

use std::time::Duration;
use thiserror::Error;

/// Result type alias for bounded-fetch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for bounded-fetch
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "concurrency_limit")
        key: Option<String>,
    },

    /// The shared HTTP client could not be created
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl Error {
    /// Build a configuration error for a specific key
    pub(crate) fn config(key: &str, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }
}

/// Failure of a single fetch task
///
/// The `Display` output of each variant is the human-readable reason recorded in a
/// `FAILED` task result, so it keeps the underlying error message for diagnostics.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Target is not a parseable absolute URL
    #[error("invalid target URL '{target}': {source}")]
    InvalidTarget {
        /// The rejected target string
        target: String,
        /// Parser error
        #[source]
        source: url::ParseError,
    },

    /// The concurrency gate was closed before the task was admitted
    #[error("concurrency gate closed: scheduler is shutting down")]
    GateClosed,

    /// The pipeline was cancelled before the task completed
    #[error("cancelled")]
    Cancelled,

    /// Request did not complete within the configured timeout
    #[error("request timed out after {timeout:?}: {source}")]
    Timeout {
        /// The timeout that elapsed
        timeout: Duration,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// Connection could not be established
    #[error("connection failed: {0}")]
    Connect(#[source] reqwest::Error),

    /// Any other transport-level failure (request building, body read, redirects)
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Response body is not valid JSON
    #[error("malformed JSON body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Response body is valid JSON but has a shape the payload transform cannot handle
    #[error("unsupported JSON body: {0}")]
    UnsupportedBody(String),
}

impl FetchError {
    /// Classify a client error raised while sending a request or reading its body
    pub(crate) fn from_transport(source: reqwest::Error, timeout: Duration) -> Self {
        if source.is_timeout() {
            FetchError::Timeout { timeout, source }
        } else if source.is_connect() {
            FetchError::Connect(source)
        } else {
            FetchError::Transport(source)
        }
    }
}
