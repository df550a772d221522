//! Error types for medir
//!
//! The taxonomy mirrors how failures propagate: a build failure is fatal to
//! the whole experiment, per-point failures (run, timeout, extraction) are
//! logged and skipped, and an all-empty chart is refused rather than written.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Harness error types
#[derive(Error, Debug)]
pub enum Error {
    /// Build precondition failed; aborts the entire experiment.
    #[error("build failed: `{command}` exited with status {status}")]
    BuildFailed {
        /// Build command line that was invoked
        command: String,
        /// Exit status description (code or terminating signal)
        status: String,
    },

    /// External program exited non-zero; the point is skipped.
    #[error("run failed: `{command}` exited with status {status} (capture kept at {} for diagnosis)", capture.display())]
    RunFailed {
        /// Full command line that was invoked
        command: String,
        /// Exit status description (code or terminating signal)
        status: String,
        /// Path of the partial capture file, left in place
        capture: PathBuf,
    },

    /// External program exceeded the configured deadline and was killed.
    #[error("run timed out after {seconds}s: `{command}`")]
    Timeout {
        /// Full command line that was invoked
        command: String,
        /// Configured timeout in seconds
        seconds: u64,
    },

    /// Capture scanned to the end without every required metric being set.
    #[error("missing metrics: {}", missing.join(", "))]
    MissingMetrics {
        /// Names of the required metrics that were never seen
        missing: Vec<String>,
    },

    /// No group in the result set had a single usable point.
    #[error("no valid data to chart")]
    NoData,

    /// Chart backend error
    #[error("chart rendering failed: {0}")]
    Chart(String),

    /// Configuration error
    #[error("invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error aborts the whole experiment rather than one point.
    ///
    /// Only build failures are fatal; run, timeout and extraction errors are
    /// caught per point and converted into an omitted result.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::BuildFailed { .. })
    }
}
