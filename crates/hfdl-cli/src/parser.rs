//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;
use hfdl_hf::{DEFAULT_ENDPOINT, DEFAULT_REVISION};

use crate::handlers::download::DownloadArgs;

/// Download the files of a HuggingFace model repository.
///
/// `--model` is checked by the handler rather than clap so that a missing
/// repository id exits with status 1.
#[derive(Debug, Parser)]
#[command(name = "hfdl")]
#[command(about = "Download files from a HuggingFace model repository")]
#[command(version)]
pub struct Cli {
    /// HuggingFace model ID (e.g. `org/name`)
    #[arg(short = 'm', long = "model")]
    pub model: Option<String>,

    /// Base output directory
    #[arg(short = 'o', long = "output", default_value = "./downloads")]
    pub output: PathBuf,

    /// Download a specific file
    #[arg(short = 'f', long = "file")]
    pub file: Option<String>,

    /// HuggingFace access token
    #[arg(short = 't', long = "token")]
    pub token: Option<String>,

    /// Branch, tag or commit to download from
    #[arg(short = 'r', long = "revision", default_value = DEFAULT_REVISION)]
    pub revision: String,

    /// Hub endpoint
    #[arg(long = "endpoint", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Also download files inside subdirectories
    #[arg(long = "recursive")]
    pub recursive: bool,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    /// Turn parsed flags into handler arguments.
    ///
    /// Returns `None` when no repository id was given.
    pub fn download_args(&self) -> Option<DownloadArgs> {
        let model_id = self.model.clone().filter(|m| !m.is_empty())?;
        Some(DownloadArgs {
            model_id,
            output_dir: self.output.clone(),
            file: self.file.clone().filter(|f| !f.is_empty()),
            token: self.token.clone(),
            revision: self.revision.clone(),
            endpoint: self.endpoint.clone(),
            recursive: self.recursive,
        })
    }
}
