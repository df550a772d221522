//! Metric extraction from captured program output
//!
//! The external program prints human-readable, mixed-language diagnostics.
//! Somewhere in that text a marker line opens the post-processing metrics
//! section; only `<Label>: <integer>` lines *after* the marker count. The
//! same labels also appear in a pre-processing section before the marker,
//! which is exactly why the gate matters.
//!
//! Extraction is an explicit two-state machine (outside / inside the
//! section) over the capture's lines, with a fixed table mapping label
//! substrings to metric identifiers. It never touches a subprocess, so it
//! is unit-testable against plain strings.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::warn;

use crate::error::{Error, Result};
use crate::params::Mode;

/// Marker substring that opens the post-processing metrics section.
pub const SECTION_MARKER: &str = "Métricas de Pós-processamento:";

/// Fixed metric vocabulary reported by the external program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Metric {
    /// Record reads
    Reads,
    /// Key comparisons
    Comparisons,
    /// Block transfers
    Transfers,
}

impl Metric {
    const ALL: [Self; 3] = [Self::Reads, Self::Comparisons, Self::Transfers];

    /// Label substring that introduces this metric in the captured text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Reads => "Leituras:",
            Self::Comparisons => "Comparações:",
            Self::Transfers => "Transferências:",
        }
    }

    /// Metric name without the trailing colon, used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Reads => "Leituras",
            Self::Comparisons => "Comparações",
            Self::Transfers => "Transferências",
        }
    }

    /// Metrics a mode must report for an extraction to be valid.
    #[must_use]
    pub const fn required_for(mode: Mode) -> [Self; 2] {
        match mode {
            Mode::Sort => [Self::Reads, Self::Comparisons],
            Mode::Search => [Self::Transfers, Self::Comparisons],
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Counter values extracted from one capture, keyed by metric.
///
/// A record is only ever handed out complete: every metric the active mode
/// requires is present, or extraction failed instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricRecord {
    values: BTreeMap<Metric, u64>,
}

impl MetricRecord {
    /// Get one counter, if it was reported.
    #[must_use]
    pub fn get(&self, metric: Metric) -> Option<u64> {
        self.values.get(&metric).copied()
    }

    /// Number of distinct metrics present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no metric was set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over (metric, value) pairs in fixed vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, u64)> + '_ {
        self.values.iter().map(|(&m, &v)| (m, v))
    }
}

/// Ordered per-metric value sequences from a capture that accumulated
/// several appended result blocks (the multi-run aggregation path).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricSeries {
    values: BTreeMap<Metric, Vec<u64>>,
}

impl MetricSeries {
    /// All occurrences of one metric, in file order.
    #[must_use]
    pub fn get(&self, metric: Metric) -> &[u64] {
        self.values.get(&metric).map_or(&[], Vec::as_slice)
    }

    /// Pair the i-th occurrences of two metrics into (x, y) points.
    ///
    /// The pairing stops at the shorter sequence; a capture whose blocks
    /// all carry both metrics loses nothing.
    #[must_use]
    pub fn points(&self, x: Metric, y: Metric) -> Vec<(u64, u64)> {
        self.get(x)
            .iter()
            .zip(self.get(y))
            .map(|(&a, &b)| (a, b))
            .collect()
    }
}

#[derive(PartialEq, Eq)]
enum Section {
    Outside,
    Inside,
}

/// Drives the line scan, invoking `on_value` for every well-formed metric
/// line found after the marker. Malformed values are logged and dropped
/// without aborting the scan.
fn scan(text: &str, mut on_value: impl FnMut(Metric, u64)) {
    let mut section = Section::Outside;
    for raw in text.lines() {
        let line = raw.trim();
        if line.contains(SECTION_MARKER) {
            // The marker line itself is never a metric line.
            section = Section::Inside;
            continue;
        }
        if section == Section::Outside {
            continue;
        }
        for metric in Metric::ALL {
            let Some(at) = line.find(metric.label()) else {
                continue;
            };
            let rest = line[at + metric.label().len()..].trim();
            match rest.parse::<u64>() {
                Ok(value) => on_value(metric, value),
                Err(_) => {
                    warn!(metric = %metric, line, "unparsable metric value, dropping");
                }
            }
            break;
        }
    }
}

fn missing_for(mode: Mode, has: impl Fn(Metric) -> bool) -> Vec<String> {
    Metric::required_for(mode)
        .into_iter()
        .filter(|&m| !has(m))
        .map(|m| m.name().to_string())
        .collect()
}

/// Extract the metric record for a single run from captured text.
///
/// Duplicate labels after the marker overwrite each other, last write wins.
///
/// # Errors
///
/// Returns [`Error::MissingMetrics`] naming every metric required by `mode`
/// that was never set, including the case where the marker line is absent
/// and the whole text was therefore ignored.
pub fn extract(text: &str, mode: Mode) -> Result<MetricRecord> {
    let mut record = MetricRecord::default();
    scan(text, |metric, value| {
        record.values.insert(metric, value);
    });
    let missing = missing_for(mode, |m| record.values.contains_key(&m));
    if missing.is_empty() {
        Ok(record)
    } else {
        Err(Error::MissingMetrics { missing })
    }
}

/// Extract every occurrence of every metric, in file order.
///
/// This is the aggregation path for search captures that accumulate
/// appended result blocks; the single-run path is [`extract`].
///
/// # Errors
///
/// Returns [`Error::MissingMetrics`] if a metric required by `mode` has no
/// occurrence at all.
pub fn extract_series(text: &str, mode: Mode) -> Result<MetricSeries> {
    let mut series = MetricSeries::default();
    scan(text, |metric, value| {
        series.values.entry(metric).or_default().push(value);
    });
    let missing = missing_for(mode, |m| series.values.contains_key(&m));
    if missing.is_empty() {
        Ok(series)
    } else {
        Err(Error::MissingMetrics { missing })
    }
}

/// Append an extracted-results trailer block to an accumulated search
/// capture, in the shape later [`extract_series`] passes recognize.
///
/// # Errors
///
/// Returns an IO error if the capture file cannot be opened or written.
pub fn append_result_block(path: &Path, transfers: u64, comparisons: u64) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    write!(
        file,
        "\nResultados extraídos:\nTransferências: {transfers}\nComparações: {comparisons}\n"
    )?;
    Ok(())
}
