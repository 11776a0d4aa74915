//! Repository file listing and download streams.

use std::collections::HashSet;

use crate::error::HfResult;
use crate::http::HttpBackend;
use crate::models::{FileMetadata, RemoteFile, TreeEntry};
use crate::url::{build_download_url, build_tree_url};

use super::HfClient;

impl<B: HttpBackend> HfClient<B> {
    /// List one level of the repository tree.
    pub(crate) async fn list_tree(
        &self,
        repo_id: &str,
        dir: Option<&str>,
    ) -> HfResult<Vec<TreeEntry>> {
        let url = build_tree_url(&self.config, repo_id, dir)?;
        self.backend.get_json(&url).await
    }

    /// List files in a repository.
    ///
    /// Directory entries are dropped, or expanded in place when the client
    /// was configured as recursive.
    pub(crate) async fn list_repo_files(&self, repo_id: &str) -> HfResult<Vec<FileMetadata>> {
        let mut files = Vec::new();
        // Directories already listed; the root is the empty path.
        let mut visited = HashSet::from([String::new()]);
        // Stack of pending directory listings, entries kept in listing order.
        let mut pending = vec![self.list_tree(repo_id, None).await?.into_iter()];

        while let Some(entries) = pending.last_mut() {
            let Some(entry) = entries.next() else {
                pending.pop();
                continue;
            };

            if !entry.is_directory() {
                files.push(FileMetadata::from(entry));
            } else if !self.config.recursive {
                tracing::debug!(path = %entry.path, "skipping directory entry");
            } else if visited.insert(entry.path.clone()) {
                let children = self.list_tree(repo_id, Some(&entry.path)).await?;
                pending.push(children.into_iter());
            } else {
                tracing::warn!(path = %entry.path, "directory listed twice, not descending again");
            }
        }

        Ok(files)
    }

    /// Open a streaming download for one file.
    pub(crate) async fn open_repo_file(&self, repo_id: &str, file_path: &str) -> HfResult<RemoteFile> {
        let url = build_download_url(&self.config, repo_id, file_path)?;
        self.backend.get_stream(&url).await
    }
}
