//! hfdl command-line library.
//!
//! The binary in `main.rs` is a thin shell over this crate so the parser and
//! handlers can be tested without spawning a process.

pub mod error;
pub mod handlers;
pub mod logging;
pub mod parser;

pub use error::CliError;
pub use logging::init_tracing;
pub use parser::Cli;
