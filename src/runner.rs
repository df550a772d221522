//! External program invocation and output capture
//!
//! The orchestrator never talks to `std::process` directly; it goes through
//! the [`ProcessRunner`] capability so tests can substitute a fake runner
//! returning canned text.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::ExperimentConfig;
use crate::error::{Error, Result};
use crate::params::{Mode, RunParameters};

/// How often the deadline loop polls the child for completion.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Executes one experiment point and returns its captured output.
pub trait ProcessRunner {
    /// Run the external program for `params` and return the full captured
    /// text (stdout and stderr interleaved).
    ///
    /// # Errors
    ///
    /// [`Error::RunFailed`] on non-zero exit, [`Error::Timeout`] if the
    /// configured deadline passes, or an IO error from spawning/capturing.
    fn run(&self, params: &RunParameters) -> Result<String>;
}

/// Capture-file path for one point.
///
/// A pure function of prefix, mode and record count, so rerunning the same
/// size overwrites in place and distinct sizes never contend.
#[must_use]
pub fn capture_path(dir: &Path, prefix: &str, mode: Mode, record_count: u64) -> PathBuf {
    dir.join(format!(
        "{prefix}_{}_{record_count}_registros.txt",
        mode.as_str()
    ))
}

/// Human-readable exit status, either the code or the terminating signal.
pub(crate) fn describe_status(status: ExitStatus) -> String {
    status
        .code()
        .map_or_else(|| format!("{status}"), |code| code.to_string())
}

/// Runs the real external executable, redirecting its combined output to
/// the derived capture file.
pub struct CommandRunner {
    executable: PathBuf,
    mode: Mode,
    capture_dir: PathBuf,
    capture_prefix: String,
    timeout: Duration,
}

impl CommandRunner {
    /// Create a runner with explicit settings.
    #[must_use]
    pub fn new(
        executable: impl Into<PathBuf>,
        mode: Mode,
        capture_dir: impl Into<PathBuf>,
        capture_prefix: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            executable: executable.into(),
            mode,
            capture_dir: capture_dir.into(),
            capture_prefix: capture_prefix.into(),
            timeout,
        }
    }

    /// Create a runner from an experiment configuration.
    #[must_use]
    pub fn from_config(config: &ExperimentConfig) -> Self {
        Self::new(
            &config.executable,
            config.mode,
            &config.capture_dir,
            config.capture_prefix.clone(),
            config.timeout(),
        )
    }

    /// Full command line, for logs and error context.
    fn command_line(&self, params: &RunParameters) -> String {
        let mut line = self.executable.display().to_string();
        for arg in params.args() {
            line.push(' ');
            line.push_str(&arg);
        }
        line
    }
}

impl ProcessRunner for CommandRunner {
    fn run(&self, params: &RunParameters) -> Result<String> {
        let capture = capture_path(
            &self.capture_dir,
            &self.capture_prefix,
            self.mode,
            params.record_count,
        );
        // Truncates any capture from a previous run of the same size.
        let out = File::create(&capture)?;
        let err = out.try_clone()?;
        let command = self.command_line(params);
        debug!(%command, capture = %capture.display(), "spawning external program");

        let mut child = Command::new(&self.executable)
            .args(params.args())
            .stdin(Stdio::null())
            .stdout(Stdio::from(out))
            .stderr(Stdio::from(err))
            .spawn()?;

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(Error::Timeout {
                    command,
                    seconds: self.timeout.as_secs(),
                });
            }
            thread::sleep(POLL_INTERVAL);
        };

        if !status.success() {
            return Err(Error::RunFailed {
                command,
                status: describe_status(status),
                capture,
            });
        }
        // The program's diagnostics are not guaranteed to be clean UTF-8.
        Ok(String::from_utf8_lossy(&fs::read(&capture)?).into_owned())
    }
}
