//! CLI-specific error types.
//!
//! Every variant ends the process with exit status 1.

use hfdl_download::DownloadError;
use hfdl_hf::HfError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// No repository id was supplied.
    #[error(
        "Usage: hfdl --model <model_id> [--output <dir>] [--file <filename>] [--token <token>]"
    )]
    MissingModel,

    /// The model directory could not be created.
    #[error("Failed to create model directory: {0}")]
    Setup(#[source] std::io::Error),

    /// The HTTP client could not be configured.
    #[error("Failed to configure client: {0}")]
    Client(#[source] HfError),

    /// The repository listing failed.
    #[error("Failed to list files: {0}")]
    Listing(#[source] HfError),

    /// An explicitly requested file failed.
    #[error("Failed to download file: {0}")]
    Fetch(#[source] DownloadError),
}
