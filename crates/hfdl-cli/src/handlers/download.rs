//! Download handler.
//!
//! Creates the model directory, then either fetches one named file or lists
//! the repository and fetches everything in it.

use std::path::PathBuf;

use hfdl_download::{DownloadOutcome, DownloadSummary, Downloader, model_directory};
use hfdl_hf::{DefaultHfClient, HfClientConfig, RepoClientPort};

use crate::error::CliError;

/// Download command arguments.
#[derive(Debug, Clone)]
pub struct DownloadArgs {
    pub model_id: String,
    pub output_dir: PathBuf,
    pub file: Option<String>,
    pub token: Option<String>,
    pub revision: String,
    pub endpoint: String,
    pub recursive: bool,
}

/// Execute the download command against the configured Hub.
pub async fn execute(args: &DownloadArgs) -> Result<DownloadSummary, CliError> {
    let model_dir = model_directory(&args.output_dir, &args.model_id);
    tokio::fs::create_dir_all(&model_dir)
        .await
        .map_err(CliError::Setup)?;

    println!("📁 Model directory: {}", model_dir.display());

    let config = HfClientConfig::new()
        .with_endpoint(args.endpoint.as_str())
        .with_revision(args.revision.as_str())
        .with_optional_token(args.token.clone())
        .with_recursive(args.recursive);
    let client = DefaultHfClient::new(&config).map_err(CliError::Client)?;

    let downloader = Downloader::new(client, model_dir);
    run(&downloader, &args.model_id, args.file.as_deref()).await
}

/// Drive `downloader` for one repository.
///
/// With `file` set only that file is fetched and its failure fails the run.
/// Otherwise the repository is listed and every file attempted; individual
/// failures only lower the returned count.
pub async fn run<C: RepoClientPort>(
    downloader: &Downloader<C>,
    model_id: &str,
    file: Option<&str>,
) -> Result<DownloadSummary, CliError> {
    if let Some(file) = file {
        let outcome = downloader
            .download_file(model_id, file)
            .await
            .map_err(CliError::Fetch)?;
        println!("✅ Successfully downloaded to {}", outcome.path().display());
        return Ok(DownloadSummary {
            downloaded: 1,
            skipped: usize::from(matches!(outcome, DownloadOutcome::Skipped { .. })),
            total: 1,
        });
    }

    let files = downloader
        .client()
        .list_files(model_id)
        .await
        .map_err(CliError::Listing)?;

    if files.is_empty() {
        println!("No files found in repository.");
        return Ok(DownloadSummary::default());
    }

    println!("Found {} files. Starting download...", files.len());
    tracing::debug!(model_id, count = files.len(), "listed repository");

    let summary = downloader.download_all(model_id, &files).await;
    tracing::debug!(
        failed = summary.failed(),
        skipped = summary.skipped,
        "repository download finished"
    );

    println!(
        "✅ Download complete: {}/{} files downloaded.",
        summary.downloaded, summary.total
    );
    Ok(summary)
}
