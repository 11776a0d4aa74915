//! URL construction helpers for the Hub API.
//!
//! Every path segment is percent-encoded on its own so that repository ids
//! and file paths keep their `/` separators.

use crate::error::{HfError, HfResult};
use crate::models::HfConfig;
use url::Url;

/// Append `/`-separated segments to a copy of the endpoint.
fn with_segments<'a>(base: &Url, parts: impl IntoIterator<Item = &'a str>) -> HfResult<Url> {
    let mut url = base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| HfError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?;
        segments.pop_if_empty();
        for part in parts {
            segments.extend(part.split('/').filter(|s| !s.is_empty()));
        }
    }
    Ok(url)
}

/// Build a URL for the repository tree endpoint.
///
/// `dir` lists a subdirectory instead of the repository root.
pub fn build_tree_url(config: &HfConfig, repo_id: &str, dir: Option<&str>) -> HfResult<Url> {
    let mut parts = vec!["api/models", repo_id, "tree", config.revision.as_str()];
    if let Some(dir) = dir {
        parts.push(dir);
    }
    with_segments(&config.endpoint, parts)
}

/// Build a URL for downloading a file from a repository.
pub fn build_download_url(config: &HfConfig, repo_id: &str, file_path: &str) -> HfResult<Url> {
    with_segments(
        &config.endpoint,
        [repo_id, "resolve", config.revision.as_str(), file_path],
    )
}
