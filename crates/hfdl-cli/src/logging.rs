//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Filter used with `--verbose` when `RUST_LOG` is unset.
const VERBOSE_FILTER: &str = "error,hfdl_hf=debug,hfdl_download=debug,hfdl_cli=debug";

/// Install the global subscriber, logging to stderr.
///
/// `RUST_LOG` takes precedence. Otherwise only errors are logged, since
/// per-file failures are already reported on the terminal.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { VERBOSE_FILTER } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A subscriber may already be installed (tests); keep the first one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
