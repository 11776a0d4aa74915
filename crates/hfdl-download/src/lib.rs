#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]

mod downloader;
mod error;
mod paths;
mod progress;

pub use downloader::{DownloadOutcome, DownloadSummary, Downloader};
pub use error::DownloadError;
pub use paths::{FALLBACK_DIR_NAME, model_directory, resolve_target, sanitize_repo_id};
pub use progress::{
    CountingReader, ProgressOutput, ProgressReporter, ProgressSnapshot, ProgressThrottle,
    format_eta, stderr_output, stdout_output,
};

