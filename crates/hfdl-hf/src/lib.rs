#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::{DefaultHfClient, HfClient};
pub use http::HttpBackend;
pub use port::RepoClientPort;

// Configuration
pub use config::{DEFAULT_ENDPOINT, DEFAULT_REVISION, DEFAULT_TIMEOUT, HfClientConfig};

// Errors
pub use error::{HfError, HfErrorKind, HfResult};

// Data types
pub use models::{FileMetadata, RemoteFile};
