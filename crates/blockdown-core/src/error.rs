//! Error types for the blockdown engine.
//!
//! All errors in the workspace are represented by the [`Error`] enum.
//! This ensures composable error handling across crates, and lets the
//! retry executor classify upstream API failures without downcasting.

use thiserror::Error as ThisError;

/// The core error type for all blockdown operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// Upstream document-store API failure.
    ///
    /// `status` is the HTTP status code; `retry_after` is the server's
    /// `Retry-After` hint in seconds, when one was supplied.
    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        retry_after: Option<f64>,
        message: String,
    },

    /// Parse error
    #[error("Parse error: {reason}")]
    ParseError { reason: String },

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic unclassified error
    #[error("Error: {0}")]
    Other(String),

    /// Wrapped error from the owning client
    #[error("Wrapped error: {0}")]
    Wrapped(Box<dyn std::error::Error + Send + Sync>),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an API error from a status code
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Error::Api {
            status,
            retry_after: None,
            message: message.into(),
        }
    }

    /// Create an API error carrying a server `Retry-After` hint (seconds)
    pub fn api_with_retry_after(
        status: u16,
        retry_after: f64,
        message: impl Into<String>,
    ) -> Self {
        Error::Api {
            status,
            retry_after: Some(retry_after),
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse_error(reason: impl Into<String>) -> Self {
        Error::ParseError {
            reason: reason.into(),
        }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Whether this error is transient and worth retrying.
    ///
    /// Retryable iff the upstream returned 429 (rate limited) or any
    /// 5xx server error. Everything else, including errors with no
    /// status code at all, propagates on first failure.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Api { status, .. } if *status == 429 || *status >= 500)
    }

    /// The server's `Retry-After` hint in seconds, if present and non-negative.
    pub fn retry_after_secs(&self) -> Option<f64> {
        match self {
            Error::Api {
                retry_after: Some(secs),
                ..
            } if *secs >= 0.0 => Some(*secs),
            _ => None,
        }
    }
}
