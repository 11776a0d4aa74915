//! CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use hfdl_cli::{Cli, CliError, handlers, init_tracing};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.download_args() {
        Some(args) => handlers::download::execute(&args).await.map(|_| ()),
        None => Err(CliError::MissingModel),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::MissingModel) => {
            eprintln!("{}", CliError::MissingModel);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
