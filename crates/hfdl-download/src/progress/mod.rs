//! Progress tracking and terminal rendering.
//!
//! One `ProgressReporter` lives for the duration of a single file transfer.
//! Bytes reach it through `CountingReader`, and redraws are rate-limited by
//! `ProgressThrottle`.

mod reader;
mod reporter;
mod throttle;

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

pub use reader::CountingReader;
pub use reporter::{ProgressReporter, ProgressSnapshot, format_eta};
pub use throttle::ProgressThrottle;

/// Shared terminal sink. The mutex serializes writers so lines never interleave.
pub type ProgressOutput = Arc<Mutex<dyn Write + Send>>;

/// Progress output bound to the process stdout.
pub fn stdout_output() -> ProgressOutput {
    Arc::new(Mutex::new(io::stdout()))
}

/// Output bound to the process stderr, for failure lines.
pub fn stderr_output() -> ProgressOutput {
    Arc::new(Mutex::new(io::stderr()))
}

/// Write text to the sink, ignoring output errors.
pub(crate) fn emit(output: &ProgressOutput, text: &str) {
    if let Ok(mut out) = output.lock() {
        out.write_all(text.as_bytes()).ok();
        out.flush().ok();
    }
}
