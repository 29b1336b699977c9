//! Error types for the reconciliation core
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for reconciliation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the reconciliation system
#[derive(Error, Debug)]
pub enum Error {
    /// Remote API failure, with the HTTP status code when one was observed.
    ///
    /// The UptimeRobot API also reports failures inside a 200 response
    /// envelope; those arrive here with `status: None` and the envelope's
    /// error text in `message`.
    #[error("API error: {message}")]
    Api {
        /// HTTP status code, if the failure had one
        status: Option<u16>,
        /// Error message text
        message: String,
    },

    /// Resource not found
    #[error("not found: {0}")]
    NotFound(String),

    /// The retry ceiling elapsed while failures remained retryable
    #[error("deadline exceeded after {ceiling:?}; last error: {last}")]
    DeadlineExceeded {
        /// The configured retry ceiling
        ceiling: std::time::Duration,
        /// The last retryable error observed before giving up
        last: Box<Error>,
    },

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// HTTP transport errors (from the remote API client)
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a remote API error
    pub fn api(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an HTTP transport error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// The HTTP status code carried by this error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
