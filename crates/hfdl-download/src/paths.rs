//! Local path planning for downloads.
//!
//! Repository ids become directory names and remote file paths are resolved
//! under that directory without touching the filesystem.

use std::path::{Component, Path, PathBuf};

use crate::error::DownloadError;

/// Directory name used when a repository id sanitizes to nothing.
pub const FALLBACK_DIR_NAME: &str = "model";

/// Sanitize a repository id for use as a directory name.
///
/// Every character outside `[A-Za-z0-9._-]` becomes `_`, then leading and
/// trailing `.`, `_` and `-` are trimmed.
pub fn sanitize_repo_id(repo_id: &str) -> String {
    let replaced: String = repo_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = replaced.trim_matches(|c| matches!(c, '.' | '_' | '-'));
    if trimmed.is_empty() {
        FALLBACK_DIR_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Build the model directory path from `output_dir` and `repo_id`.
pub fn model_directory(output_dir: &Path, repo_id: &str) -> PathBuf {
    output_dir.join(sanitize_repo_id(repo_id))
}

/// Resolve a remote, `/`-separated path to a local path strictly inside `base`.
///
/// Resolution is lexical: `.` is ignored and `..` pops a previously pushed
/// component. Absolute paths, drive prefixes, a `..` that would climb above
/// `base`, and paths resolving to `base` itself are rejected.
pub fn resolve_target(base: &Path, remote_path: &str) -> Result<PathBuf, DownloadError> {
    let mut relative = PathBuf::new();

    for component in Path::new(remote_path).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !relative.pop() {
                    return Err(DownloadError::path(remote_path));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(DownloadError::path(remote_path));
            }
        }
    }

    if relative.as_os_str().is_empty() {
        return Err(DownloadError::path(remote_path));
    }

    Ok(base.join(relative))
}
