//! Download error types.

use hfdl_hf::HfError;
use thiserror::Error;

/// Errors raised while downloading a single file.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The remote path would land outside the download directory.
    #[error("Invalid file path: {path}")]
    Path {
        /// The offending remote path
        path: String,
    },

    /// A filesystem step failed.
    #[error("Failed to {context}: {source}")]
    Io {
        /// Which step failed (e.g. `create temp file`)
        context: &'static str,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The repository client failed.
    #[error(transparent)]
    Remote(#[from] HfError),
}

impl DownloadError {
    /// Create a path error.
    pub fn path(path: impl Into<String>) -> Self {
        Self::Path { path: path.into() }
    }

    /// Create an IO error for a named step.
    pub const fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }
}
