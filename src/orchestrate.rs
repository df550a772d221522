//! Experiment orchestration
//!
//! Drives one external-program invocation and one extraction per configured
//! record count, strictly sequentially. Failures are independent and
//! non-fatal: a failed run, a timed-out run or a failed extraction is
//! logged and that point is omitted; the loop proceeds. Only the one-time
//! build precondition is fatal.

use chrono::{DateTime, Utc};
use std::process::Command;
use tracing::{info, warn};

use crate::config::ExperimentConfig;
use crate::error::{Error, Result};
use crate::extract::{self, MetricRecord};
use crate::runner::{describe_status, ProcessRunner};

/// Outcome of one experiment point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointStatus {
    /// Run and extraction both succeeded; the point is in the result set.
    Success,
    /// Run or extraction failed; the point was omitted.
    Failed,
}

/// Per-point execution report, kept for the orchestration summary.
#[derive(Debug, Clone)]
pub struct RunReport {
    record_count: u64,
    status: PointStatus,
    started_at: DateTime<Utc>,
    ended_at: DateTime<Utc>,
}

impl RunReport {
    /// Record count of the point this report covers.
    #[must_use]
    pub const fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Final outcome of the point.
    #[must_use]
    pub const fn status(&self) -> PointStatus {
        self.status
    }

    /// When the point started executing.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// When the point finished (successfully or not).
    #[must_use]
    pub const fn ended_at(&self) -> DateTime<Utc> {
        self.ended_at
    }
}

/// Ordered collection of successfully measured experiment points.
///
/// Insertion order follows the configured size matrix. Lives for one
/// orchestration pass and feeds the chart renderer.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    points: Vec<(u64, MetricRecord)>,
}

impl ResultSet {
    /// Append a successful point.
    pub fn push(&mut self, record_count: u64, record: MetricRecord) {
        self.points.push((record_count, record));
    }

    /// All points, in matrix order.
    #[must_use]
    pub fn points(&self) -> &[(u64, MetricRecord)] {
        &self.points
    }

    /// Number of successful points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no point succeeded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Run the configured build command once, before any experiment point.
///
/// An empty build command means the executable is pre-built and the step
/// is skipped.
///
/// # Errors
///
/// [`Error::BuildFailed`] on non-zero exit; this is fatal to the whole
/// experiment.
pub fn build_executable(config: &ExperimentConfig) -> Result<()> {
    let Some((program, args)) = config.build_command.split_first() else {
        info!("no build command configured, assuming pre-built executable");
        return Ok(());
    };
    let command = config.build_command.join(" ");
    info!(%command, "building external program");
    let status = Command::new(program).args(args).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(Error::BuildFailed {
            command,
            status: describe_status(status),
        })
    }
}

/// Drive the full sweep: build once, then one run + extraction per record
/// count, collecting only the successful points.
///
/// Points execute strictly sequentially; capture paths are shared per size,
/// and the external program is assumed CPU/IO-bound.
///
/// # Errors
///
/// Only [`Error::BuildFailed`] (or the IO error spawning the build command)
/// propagates. Per-point failures are logged with their record count and
/// converted into an omitted point.
pub fn run_experiment<R: ProcessRunner>(
    config: &ExperimentConfig,
    runner: &R,
) -> Result<(ResultSet, Vec<RunReport>)> {
    build_executable(config)?;

    let mut results = ResultSet::default();
    let mut reports = Vec::with_capacity(config.record_counts.len());

    for &record_count in &config.record_counts {
        let params = config.params_for(record_count);
        info!(
            method = params.method.display_name(),
            record_count, "running experiment point"
        );
        let started_at = Utc::now();
        let outcome = runner
            .run(&params)
            .and_then(|text| extract::extract(&text, config.mode));
        let ended_at = Utc::now();

        let status = match outcome {
            Ok(record) => {
                results.push(record_count, record);
                PointStatus::Success
            }
            Err(err) => {
                warn!(record_count, %err, "point skipped");
                PointStatus::Failed
            }
        };
        reports.push(RunReport {
            record_count,
            status,
            started_at,
            ended_at,
        });
    }

    info!(
        configured = config.record_counts.len(),
        succeeded = results.len(),
        "experiment pass complete"
    );
    Ok((results, reports))
}
