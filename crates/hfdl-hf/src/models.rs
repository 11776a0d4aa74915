//! API response types and client-facing DTOs.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::io::AsyncRead;
use url::Url;

use crate::config::{DEFAULT_ENDPOINT, DEFAULT_REVISION, DEFAULT_TIMEOUT};

// ============================================================================
// Configuration (used internally, see config.rs for public config)
// ============================================================================

/// Internal configuration for the repository client.
#[derive(Debug, Clone)]
pub struct HfConfig {
    /// Hub endpoint (default: <https://huggingface.co>)
    pub endpoint: Url,
    /// Revision to list and download from (default: `main`)
    pub revision: String,
    /// Optional bearer token
    pub token: Option<String>,
    /// Overall request timeout (default: 120s)
    pub timeout: Duration,
    /// User agent sent with every request
    pub user_agent: String,
    /// Expand directories when listing
    pub recursive: bool,
}

impl Default for HfConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is valid"),
            revision: DEFAULT_REVISION.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("hfdl/", env!("CARGO_PKG_VERSION")).to_string(),
            recursive: false,
        }
    }
}

// ============================================================================
// File Metadata
// ============================================================================

/// A file in a remote repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// Path relative to the repository root, `/`-separated
    pub path: String,
    /// Size in bytes, 0 when the listing did not report one
    #[serde(default)]
    pub size: u64,
}

impl FileMetadata {
    /// Create a new file entry.
    pub fn new(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

// ============================================================================
// Tree Entry (wire format)
// ============================================================================

/// Type of entry in a repository tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Regular file
    #[default]
    File,
    /// Directory
    Directory,
}

/// Entry in a repository file tree as returned by the listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry {
    /// Path relative to repository root
    pub path: String,
    /// Entry type, files when absent
    #[serde(rename = "type", default)]
    pub entry_type: EntryType,
    /// File size in bytes (0 for directories)
    #[serde(default)]
    pub size: u64,
}

impl TreeEntry {
    /// Check if this is a directory.
    pub fn is_directory(&self) -> bool {
        self.entry_type == EntryType::Directory
    }
}

impl From<TreeEntry> for FileMetadata {
    fn from(entry: TreeEntry) -> Self {
        Self {
            path: entry.path,
            size: entry.size,
        }
    }
}

// ============================================================================
// Remote File Stream
// ============================================================================

/// Live, single-read byte stream for one remote file.
///
/// Dropping the value closes the underlying connection.
pub struct RemoteFile {
    /// Body bytes
    pub reader: Box<dyn AsyncRead + Send + Unpin>,
    /// Declared `Content-Length`, `None` when the server did not send one
    pub content_length: Option<u64>,
}

impl RemoteFile {
    /// Wrap a reader with an optional declared length.
    pub fn new(reader: impl AsyncRead + Send + Unpin + 'static, content_length: Option<u64>) -> Self {
        Self {
            reader: Box::new(reader),
            content_length,
        }
    }
}

impl fmt::Debug for RemoteFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteFile")
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}
