//! Sequential repository downloader.
//!
//! Each file is streamed into a temp file in the target's directory and then
//! renamed over the target, so the final path only ever holds a complete
//! file (or whatever was there before).

use std::path::{Path, PathBuf};

use hfdl_hf::{FileMetadata, RepoClientPort};
use tokio::io::AsyncWriteExt;

use crate::error::DownloadError;
use crate::paths::resolve_target;
use crate::progress::{
    CountingReader, ProgressOutput, ProgressReporter, emit, stderr_output, stdout_output,
};

/// Result of a successful single-file download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The file was fetched and placed at `path`.
    Downloaded {
        /// Final local path
        path: PathBuf,
        /// Bytes written
        bytes: u64,
    },
    /// A non-empty file was already present at `path`.
    Skipped {
        /// Existing local path
        path: PathBuf,
    },
}

impl DownloadOutcome {
    /// Local path of the file.
    pub fn path(&self) -> &Path {
        match self {
            Self::Downloaded { path, .. } | Self::Skipped { path } => path,
        }
    }
}

/// Tally of a repository-wide download.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    /// Files that succeeded, skipped ones included
    pub downloaded: usize,
    /// Files that were already present
    pub skipped: usize,
    /// Files attempted
    pub total: usize,
}

impl DownloadSummary {
    /// Files that failed.
    pub const fn failed(&self) -> usize {
        self.total - self.downloaded
    }

    /// Whether every file succeeded.
    pub const fn is_complete(&self) -> bool {
        self.downloaded == self.total
    }
}

/// Downloads repository files under a base directory.
pub struct Downloader<C> {
    client: C,
    base_dir: PathBuf,
    output: ProgressOutput,
    warnings: ProgressOutput,
}

impl<C: RepoClientPort> Downloader<C> {
    /// Create a downloader writing under `base_dir`.
    ///
    /// Progress goes to stdout and per-file failures to stderr.
    pub fn new(client: C, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            base_dir: base_dir.into(),
            output: stdout_output(),
            warnings: stderr_output(),
        }
    }

    /// Send progress and status lines to `output` instead of stdout.
    #[must_use]
    pub fn with_output(mut self, output: ProgressOutput) -> Self {
        self.output = output;
        self
    }

    /// Send per-file failure lines to `warnings` instead of stderr.
    #[must_use]
    pub fn with_warning_output(mut self, warnings: ProgressOutput) -> Self {
        self.warnings = warnings;
        self
    }

    /// The repository client.
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Download one file of `repo_id` to `<base_dir>/<file_path>`.
    ///
    /// An existing non-empty file at the target is left alone and reported
    /// as skipped without contacting the server. Any failure leaves the
    /// target as it was.
    pub async fn download_file(
        &self,
        repo_id: &str,
        file_path: &str,
    ) -> Result<DownloadOutcome, DownloadError> {
        let target = resolve_target(&self.base_dir, file_path)?;
        let parent = target
            .parent()
            .map_or_else(|| self.base_dir.clone(), Path::to_path_buf);

        tokio::fs::create_dir_all(&parent)
            .await
            .map_err(|e| DownloadError::io("create directory", e))?;

        if let Ok(meta) = tokio::fs::metadata(&target).await {
            if meta.is_file() && meta.len() > 0 {
                tracing::debug!(path = %target.display(), "already present, skipping");
                emit(
                    &self.output,
                    &format!("⏭️  Skipping {file_path} (already exists)\n"),
                );
                return Ok(DownloadOutcome::Skipped { path: target });
            }
        }

        let remote = self.client.open_file_stream(repo_id, file_path).await?;

        let file_name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp = tempfile::Builder::new()
            .prefix(&format!(".tmp-{file_name}"))
            .tempfile_in(&parent)
            .map_err(|e| DownloadError::io("create temp file", e))?;
        let (file, temp_path) = temp.into_parts();
        let mut file = tokio::fs::File::from_std(file);

        let mut reporter = ProgressReporter::new(file_path, remote.content_length, self.output.clone());
        reporter.start();

        let mut reader = CountingReader::new(remote.reader, &mut reporter);
        let copied = async {
            let written = tokio::io::copy(&mut reader, &mut file).await?;
            file.flush().await?;
            file.sync_all().await?;
            Ok::<_, std::io::Error>(written)
        }
        .await;
        drop(reader);
        drop(file);

        let written = match copied {
            Ok(written) => written,
            Err(e) => {
                reporter.abandon();
                if let Err(cleanup) = temp_path.close() {
                    tracing::warn!(error = %cleanup, "failed to remove temp file");
                }
                return Err(DownloadError::io("write", e));
            }
        };

        if let Err(e) = temp_path.persist(&target) {
            reporter.abandon();
            return Err(DownloadError::io("rename", e.error));
        }
        tracing::debug!(path = %target.display(), bytes = written, "placed file");

        let size = remote.content_length.filter(|len| *len > 0).unwrap_or(written);
        reporter.finish(size);

        Ok(DownloadOutcome::Downloaded {
            path: target,
            bytes: written,
        })
    }

    /// Download every file in `files`, in order.
    ///
    /// Per-file failures are reported and skipped over; the summary tells the
    /// caller how many succeeded.
    pub async fn download_all(&self, repo_id: &str, files: &[FileMetadata]) -> DownloadSummary {
        let mut summary = DownloadSummary {
            total: files.len(),
            ..DownloadSummary::default()
        };

        for file in files {
            match self.download_file(repo_id, &file.path).await {
                Ok(outcome) => {
                    summary.downloaded += 1;
                    if matches!(outcome, DownloadOutcome::Skipped { .. }) {
                        summary.skipped += 1;
                    }
                }
                Err(err) => {
                    tracing::warn!(repo_id, path = %file.path, error = %err, "download failed");
                    emit(
                        &self.warnings,
                        &format!("⚠️  Failed to download {}: {err}\n", file.path),
                    );
                }
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::model_directory;
    use async_trait::async_trait;
    use hfdl_hf::{HfError, HfResult, RemoteFile};
    use std::collections::HashMap;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    // ------------------------------------------------------------------------
    // Stub client
    // ------------------------------------------------------------------------

    #[derive(Clone)]
    enum StubBody {
        Bytes(Vec<u8>, Option<u64>),
        FailAfter(Vec<u8>),
        Missing,
    }

    #[derive(Default)]
    struct StubClient {
        bodies: HashMap<String, StubBody>,
        opens: AtomicUsize,
    }

    impl StubClient {
        fn with(mut self, path: &str, body: StubBody) -> Self {
            self.bodies.insert(path.to_string(), body);
            self
        }

        fn serving(path: &str, bytes: &[u8]) -> Self {
            Self::default().with(path, StubBody::Bytes(bytes.to_vec(), Some(bytes.len() as u64)))
        }

        fn opens(&self) -> usize {
            self.opens.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RepoClientPort for StubClient {
        async fn list_files(&self, _repo_id: &str) -> HfResult<Vec<FileMetadata>> {
            Ok(Vec::new())
        }

        async fn open_file_stream(&self, _repo_id: &str, file_path: &str) -> HfResult<RemoteFile> {
            self.opens.fetch_add(1, Ordering::SeqCst);
            match self.bodies.get(file_path).cloned().unwrap_or(StubBody::Missing) {
                StubBody::Bytes(bytes, len) => Ok(RemoteFile::new(io::Cursor::new(bytes), len)),
                StubBody::FailAfter(prefix) => {
                    let reader = tokio_test::io::Builder::new()
                        .read(&prefix)
                        .read_error(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"))
                        .build();
                    Ok(RemoteFile::new(reader, Some(prefix.len() as u64 * 2)))
                }
                StubBody::Missing => Err(HfError::Api {
                    status: 404,
                    body: "Entry not found".to_string(),
                    url: format!("https://huggingface.co/acme/model/resolve/main/{file_path}"),
                }),
            }
        }
    }

    fn capture() -> (Arc<Mutex<Vec<u8>>>, ProgressOutput) {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let output: ProgressOutput = buf.clone();
        (buf, output)
    }

    fn text(buf: &Arc<Mutex<Vec<u8>>>) -> String {
        String::from_utf8(buf.lock().unwrap().clone()).unwrap()
    }

    fn downloader(client: StubClient, base: &Path) -> (Downloader<StubClient>, Arc<Mutex<Vec<u8>>>) {
        let (buf, output) = capture();
        (Downloader::new(client, base).with_output(output), buf)
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    // ------------------------------------------------------------------------
    // download_file
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn writes_exact_bytes() {
        let tmp = TempDir::new().unwrap();
        let body: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
        let (dl, out) = downloader(StubClient::serving("a.bin", &body), tmp.path());

        let outcome = dl.download_file("acme/model", "a.bin").await.unwrap();

        let target = tmp.path().join("a.bin");
        assert_eq!(
            outcome,
            DownloadOutcome::Downloaded {
                path: target.clone(),
                bytes: 10_000
            }
        );
        assert_eq!(std::fs::read(&target).unwrap(), body);
        assert_eq!(entries(tmp.path()), vec!["a.bin"]);

        let out = text(&out);
        assert!(out.contains("⏳ a.bin\n"));
        assert!(out.contains("✅ a.bin (0.01 MiB)"));
    }

    #[tokio::test]
    async fn creates_nested_directories() {
        let tmp = TempDir::new().unwrap();
        let (dl, _) = downloader(StubClient::serving("deep/er/c.json", b"{}"), tmp.path());

        dl.download_file("acme/model", "deep/er/c.json").await.unwrap();

        assert_eq!(std::fs::read(tmp.path().join("deep/er/c.json")).unwrap(), b"{}");
    }

    #[tokio::test]
    async fn skips_existing_non_empty_file_without_network() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("a.bin");
        std::fs::write(&target, b"old").unwrap();
        let (dl, out) = downloader(StubClient::serving("a.bin", b"new content"), tmp.path());

        let outcome = dl.download_file("acme/model", "a.bin").await.unwrap();

        assert_eq!(outcome, DownloadOutcome::Skipped { path: target.clone() });
        assert_eq!(dl.client().opens(), 0);
        assert_eq!(std::fs::read(&target).unwrap(), b"old");
        assert!(text(&out).contains("⏭️  Skipping a.bin (already exists)"));
    }

    #[tokio::test]
    async fn overwrites_existing_empty_file() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("a.bin");
        std::fs::write(&target, b"").unwrap();
        let (dl, _) = downloader(StubClient::serving("a.bin", b"fresh"), tmp.path());

        let outcome = dl.download_file("acme/model", "a.bin").await.unwrap();

        assert!(matches!(outcome, DownloadOutcome::Downloaded { bytes: 5, .. }));
        assert_eq!(dl.client().opens(), 1);
        assert_eq!(std::fs::read(&target).unwrap(), b"fresh");
    }

    #[tokio::test]
    async fn rejects_traversal_before_any_io() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().join("acme_model");
        let (dl, _) = downloader(StubClient::serving("../evil.bin", b"x"), &base);

        for bad in ["../evil.bin", "sub/../../evil.bin", "/etc/passwd"] {
            let err = dl.download_file("acme/model", bad).await.unwrap_err();
            assert!(matches!(err, DownloadError::Path { .. }), "{bad}: {err}");
        }

        assert_eq!(dl.client().opens(), 0);
        assert!(!base.exists());
        assert!(entries(tmp.path()).is_empty());
    }

    #[tokio::test]
    async fn failed_copy_leaves_no_file_behind() {
        let tmp = TempDir::new().unwrap();
        let client = StubClient::default().with("a.bin", StubBody::FailAfter(vec![1; 512]));
        let (dl, _) = downloader(client, tmp.path());

        let err = dl.download_file("acme/model", "a.bin").await.unwrap_err();

        assert!(matches!(err, DownloadError::Io { context: "write", .. }));
        assert!(!tmp.path().join("a.bin").exists());
        assert!(entries(tmp.path()).is_empty(), "temp file left behind");
    }

    #[tokio::test]
    async fn failed_copy_keeps_previous_content() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("a.bin");
        std::fs::write(&target, b"").unwrap();
        let client = StubClient::default().with("a.bin", StubBody::FailAfter(vec![1; 512]));
        let (dl, _) = downloader(client, tmp.path());

        dl.download_file("acme/model", "a.bin").await.unwrap_err();

        assert_eq!(std::fs::metadata(&target).unwrap().len(), 0);
        assert_eq!(entries(tmp.path()), vec!["a.bin"]);
    }

    #[tokio::test]
    async fn remote_error_propagates_unchanged() {
        let tmp = TempDir::new().unwrap();
        let (dl, _) = downloader(StubClient::default(), tmp.path());

        let err = dl.download_file("acme/model", "missing.bin").await.unwrap_err();

        assert!(matches!(
            err,
            DownloadError::Remote(HfError::Api { status: 404, .. })
        ));
        assert!(entries(tmp.path()).is_empty());
    }

    #[tokio::test]
    async fn unknown_length_reports_written_size() {
        let tmp = TempDir::new().unwrap();
        let body = vec![0u8; 3 * 1024 * 1024];
        let client = StubClient::default().with("a.bin", StubBody::Bytes(body, None));
        let (dl, out) = downloader(client, tmp.path());

        let outcome = dl.download_file("acme/model", "a.bin").await.unwrap();

        assert!(matches!(outcome, DownloadOutcome::Downloaded { bytes, .. } if bytes == 3 * 1024 * 1024));
        let out = text(&out);
        assert!(out.contains("✅ a.bin (3.00 MiB)"));
        assert!(!out.contains('%'));
    }

    // ------------------------------------------------------------------------
    // download_all
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn download_all_continues_past_failures() {
        let tmp = TempDir::new().unwrap();
        let client = StubClient::default()
            .with("one.bin", StubBody::Bytes(b"1".to_vec(), Some(1)))
            .with("two.bin", StubBody::FailAfter(b"22".to_vec()))
            .with("four.bin", StubBody::Bytes(b"4444".to_vec(), Some(4)));
        let (progress, progress_out) = capture();
        let (warnings, warnings_out) = capture();
        let dl = Downloader::new(client, tmp.path())
            .with_output(progress_out)
            .with_warning_output(warnings_out);
        let files = vec![
            FileMetadata::new("one.bin", 1),
            FileMetadata::new("two.bin", 2),
            FileMetadata::new("three.bin", 3),
            FileMetadata::new("four.bin", 4),
        ];

        let summary = dl.download_all("acme/model", &files).await;

        assert_eq!(summary.downloaded, 2);
        assert_eq!(summary.failed(), 2);
        assert!(!summary.is_complete());
        assert_eq!(dl.client().opens(), 4);
        assert_eq!(entries(tmp.path()), vec!["four.bin", "one.bin"]);

        let warnings = text(&warnings);
        assert!(warnings.contains("⚠️  Failed to download two.bin: Failed to write: connection reset"));
        assert!(warnings.contains("⚠️  Failed to download three.bin: API error: Entry not found (status 404)"));

        let progress = text(&progress);
        assert!(progress.contains("✅ one.bin"));
        assert!(!progress.contains("Failed to download"));
    }

    #[tokio::test]
    async fn download_all_counts_skips_as_success() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("a.bin"), b"present").unwrap();
        let (dl, _) = downloader(StubClient::serving("b.bin", b"bb"), tmp.path());
        let files = vec![FileMetadata::new("a.bin", 7), FileMetadata::new("b.bin", 2)];

        let summary = dl.download_all("acme/model", &files).await;

        assert_eq!(
            summary,
            DownloadSummary {
                downloaded: 2,
                skipped: 1,
                total: 2
            }
        );
        assert_eq!(dl.client().opens(), 1);
    }

    #[tokio::test]
    async fn downloads_repository_into_sanitized_directory() {
        let out_dir = TempDir::new().unwrap();
        let model_dir = model_directory(out_dir.path(), "acme/model");
        let client = StubClient::default()
            .with("a.bin", StubBody::Bytes(vec![0xAA; 1024], Some(1024)))
            .with("sub/b.bin", StubBody::Bytes(vec![0xBB; 2048], Some(2048)));
        let (dl, _) = downloader(client, &model_dir);
        let files = vec![
            FileMetadata::new("a.bin", 1024),
            FileMetadata::new("sub/b.bin", 2048),
        ];

        let summary = dl.download_all("acme/model", &files).await;

        assert_eq!(summary.downloaded, 2);
        assert!(summary.is_complete());
        let a = out_dir.path().join("acme_model/a.bin");
        let b = out_dir.path().join("acme_model/sub/b.bin");
        assert_eq!(std::fs::metadata(a).unwrap().len(), 1024);
        assert_eq!(std::fs::metadata(b).unwrap().len(), 2048);
    }
}
