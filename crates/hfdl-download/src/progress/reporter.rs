//! Single-line terminal progress for one file transfer.

use std::fmt::Write as _;
use std::time::{Duration, Instant};

use indicatif::HumanBytes;

use super::{ProgressOutput, ProgressThrottle, emit};

// ============================================================================
// Constants
// ============================================================================

const MIB: f64 = 1024.0 * 1024.0;

/// Width of the bar between the brackets.
const BAR_WIDTH: usize = 40;

/// Carriage return plus ANSI "erase entire line".
const CLEAR_LINE: &str = "\r\x1b[2K";

// ============================================================================
// Snapshot
// ============================================================================

/// Derived transfer statistics at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    /// Bytes received so far
    pub downloaded: u64,
    /// Expected size, `None` when unknown
    pub total: Option<u64>,
    /// Average speed in bytes per second since the transfer began
    pub speed: f64,
    /// Completion percentage, only when the total is known
    pub percent: Option<f64>,
    /// Estimated time remaining, only when total and speed are known
    pub eta: Option<Duration>,
}

impl ProgressSnapshot {
    /// Compute statistics for `downloaded` bytes after `elapsed`.
    ///
    /// A total of zero is treated as unknown.
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(total: Option<u64>, downloaded: u64, elapsed: Duration) -> Self {
        let total = total.filter(|t| *t > 0);
        let secs = elapsed.as_secs_f64();
        let speed = if secs > 0.0 {
            downloaded as f64 / secs
        } else {
            0.0
        };

        let percent = total.map(|t| 100.0 * downloaded as f64 / t as f64);

        // The server picks the total, so the estimate may not fit a Duration.
        let eta = match total {
            Some(t) if downloaded > 0 && speed > 0.0 => {
                let remaining = t.saturating_sub(downloaded) as f64;
                Duration::try_from_secs_f64(remaining / speed).ok()
            }
            _ => None,
        };

        Self {
            downloaded,
            total,
            speed,
            percent,
            eta,
        }
    }

    /// Render the bar and stats, without the clear-line prefix.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn format_line(&self) -> String {
        let speed = format!("{}/s", HumanBytes(self.speed as u64));

        let (Some(total), Some(percent)) = (self.total, self.percent) else {
            return format!("{}  {speed}", HumanBytes(self.downloaded));
        };

        let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64) as usize;
        let mut line = format!(
            "[{}{}] {percent:.1}%  {}/{}  {speed}",
            "=".repeat(filled),
            " ".repeat(BAR_WIDTH - filled),
            HumanBytes(self.downloaded),
            HumanBytes(total),
        );
        if let Some(eta) = self.eta {
            let _ = write!(line, "  ETA: {}", format_eta(eta));
        }
        line
    }
}

/// Format an ETA as `Ns` below one minute, `NmNs` otherwise.
pub fn format_eta(eta: Duration) -> String {
    let secs = eta.as_secs();
    if secs < 60 {
        format!("{secs}s")
    } else {
        format!("{}m{}s", secs / 60, secs % 60)
    }
}

// ============================================================================
// Reporter
// ============================================================================

/// Progress state for one file, discarded when the transfer ends.
pub struct ProgressReporter {
    name: String,
    total: Option<u64>,
    downloaded: u64,
    started: Instant,
    throttle: ProgressThrottle,
    rendered: bool,
    output: ProgressOutput,
}

impl ProgressReporter {
    /// Create a reporter for `name`; `total` of `None` or zero means unknown.
    pub fn new(name: impl Into<String>, total: Option<u64>, output: ProgressOutput) -> Self {
        let started = Instant::now();
        let mut throttle = ProgressThrottle::default_interval();
        throttle.mark(started);
        Self {
            name: name.into(),
            total: total.filter(|t| *t > 0),
            downloaded: 0,
            started,
            throttle,
            rendered: false,
            output,
        }
    }

    /// Clear the current line and announce the transfer.
    pub fn start(&mut self) {
        self.started = Instant::now();
        self.throttle.mark(self.started);
        emit(&self.output, &format!("{CLEAR_LINE}⏳ {}\n", self.name));
    }

    /// Count `n` more bytes, redrawing if the refresh interval has passed.
    pub fn increment(&mut self, n: usize) {
        self.downloaded = self.downloaded.saturating_add(n as u64);
        if self.throttle.should_emit() {
            self.render();
        }
    }

    /// Redraw the progress line.
    pub fn render(&mut self) {
        let line = self.snapshot().format_line();
        emit(&self.output, &format!("{CLEAR_LINE}{line}"));
        self.rendered = true;
    }

    /// Statistics as of now.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot::compute(self.total, self.downloaded, self.started.elapsed())
    }

    /// Bytes counted so far.
    pub const fn downloaded(&self) -> u64 {
        self.downloaded
    }

    /// Terminate the progress line and print the completion line.
    #[allow(clippy::cast_precision_loss)]
    pub fn finish(&mut self, size: u64) {
        let mut text = String::new();
        if self.rendered {
            text.push('\n');
        }
        let _ = writeln!(text, "✅ {} ({:.2} MiB)", self.name, size as f64 / MIB);
        emit(&self.output, &text);
        self.rendered = false;
    }

    /// Terminate the progress line after a failed transfer.
    pub fn abandon(&mut self) {
        if self.rendered {
            emit(&self.output, "\n");
            self.rendered = false;
        }
    }
}
