//! Error types for repository client operations.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for repository client operations.
pub type HfResult<T> = Result<T, HfError>;

/// Broad category of an [`HfError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HfErrorKind {
    /// Network failure or timeout.
    Transport,
    /// The server answered with a non-2xx status.
    Api,
    /// The response body could not be decoded.
    Decode,
    /// The client was misconfigured (bad endpoint, bad path).
    Config,
}

/// Errors related to repository API operations.
#[derive(Debug, Error)]
pub enum HfError {
    /// Connection, TLS or body streaming failure.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request did not complete within the configured timeout.
    #[error("Request to {url} timed out after {}s", after.as_secs())]
    Timeout {
        /// The URL that was requested
        url: String,
        /// The timeout that elapsed
        after: Duration,
    },

    /// API request failed with an HTTP error status.
    #[error("API error: {body} (status {status})")]
    Api {
        /// HTTP status code
        status: u16,
        /// Trimmed response body
        body: String,
        /// The URL that was requested
        url: String,
    },

    /// JSON decoding error.
    #[error("Failed to parse API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// URL construction error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl HfError {
    /// Classify this error.
    pub const fn kind(&self) -> HfErrorKind {
        match self {
            Self::Transport(_) | Self::Timeout { .. } => HfErrorKind::Transport,
            Self::Api { .. } => HfErrorKind::Api,
            Self::Decode(_) => HfErrorKind::Decode,
            Self::InvalidUrl(_) => HfErrorKind::Config,
        }
    }
}
