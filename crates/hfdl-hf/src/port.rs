//! Port trait consumed by the download pipeline.
//!
//! Downstream crates depend on `RepoClientPort` rather than on `HfClient`
//! so they can be exercised against stubs.

use async_trait::async_trait;

use crate::client::HfClient;
use crate::error::HfResult;
use crate::http::HttpBackend;
use crate::models::{FileMetadata, RemoteFile};

/// Operations the downloader needs from a repository host.
#[async_trait]
pub trait RepoClientPort: Send + Sync {
    /// List the files of a repository.
    ///
    /// # Arguments
    ///
    /// * `repo_id` - Full repository id (e.g., `acme/model`)
    async fn list_files(&self, repo_id: &str) -> HfResult<Vec<FileMetadata>>;

    /// Open a byte stream for one file of a repository.
    ///
    /// The returned stream is closed when dropped.
    async fn open_file_stream(&self, repo_id: &str, file_path: &str) -> HfResult<RemoteFile>;
}

#[async_trait]
impl<B: HttpBackend> RepoClientPort for HfClient<B> {
    async fn list_files(&self, repo_id: &str) -> HfResult<Vec<FileMetadata>> {
        self.list_repo_files(repo_id).await
    }

    async fn open_file_stream(&self, repo_id: &str, file_path: &str) -> HfResult<RemoteFile> {
        self.open_repo_file(repo_id, file_path).await
    }
}
