//! Experiment configuration
//!
//! One [`ExperimentConfig`] describes a full sweep: which program to build
//! and invoke, which variant, which record counts, and where captures and
//! the chart land. Loadable from a JSON file; every field has a default
//! mirroring the original benchmark setup.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::params::{InitialCondition, Method, Mode, RunParameters};

/// Full description of one experiment sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Benchmark mode, selects the required metric vocabulary
    pub mode: Mode,
    /// Algorithm variant passed to the external program
    pub method: Method,
    /// Ordered size matrix; one run per entry
    pub record_counts: Vec<u64>,
    /// Fixed input ordering for every run
    pub initial_condition: InitialCondition,
    /// Key to look up (search mode)
    pub search_key: Option<i64>,
    /// Pass the program's verbose flag
    pub verbose: bool,
    /// Path of the pre-built external executable
    pub executable: PathBuf,
    /// Build command run once before the first point; empty means the
    /// executable is already built and the step is skipped
    pub build_command: Vec<String>,
    /// Directory receiving capture files
    pub capture_dir: PathBuf,
    /// Capture-file name prefix
    pub capture_prefix: String,
    /// Per-run deadline in seconds; the child is killed past it
    pub timeout_seconds: u64,
    /// Chart output path; `None` selects the fixed mode-specific name
    pub chart_path: Option<PathBuf>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Sort,
            method: Method::ExternalQuicksort,
            record_counts: vec![100, 200, 2000],
            initial_condition: InitialCondition::Ascending,
            search_key: None,
            verbose: false,
            executable: PathBuf::from("./ordena"),
            build_command: vec!["make".to_string()],
            capture_dir: PathBuf::from("."),
            capture_prefix: "saida".to_string(),
            timeout_seconds: 300,
            chart_path: None,
        }
    }
}

impl ExperimentConfig {
    /// Load and validate a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// IO errors reading the file, [`Error::Config`] on malformed JSON or
    /// on a configuration that fails [`Self::validate`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: Self =
            serde_json::from_str(&text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants the rest of the harness relies on.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] on an empty size matrix, a zero record count or a
    /// zero timeout.
    pub fn validate(&self) -> Result<()> {
        if self.record_counts.is_empty() {
            return Err(Error::Config("record_counts must not be empty".to_string()));
        }
        if self.record_counts.contains(&0) {
            return Err(Error::Config("record counts must be positive".to_string()));
        }
        if self.timeout_seconds == 0 {
            return Err(Error::Config("timeout_seconds must be positive".to_string()));
        }
        Ok(())
    }

    /// Per-run deadline as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Where the rendered chart lands: the explicit override, or the fixed
    /// mode-specific name next to the captures.
    #[must_use]
    pub fn chart_output(&self) -> PathBuf {
        self.chart_path.clone().unwrap_or_else(|| {
            PathBuf::from(match self.mode {
                Mode::Sort => "grafico_comparacoes_leituras_pos.png",
                Mode::Search => "grafico_transferencias_comparacoes.png",
            })
        })
    }

    /// Parameters for one experiment point of this sweep.
    #[must_use]
    pub const fn params_for(&self, record_count: u64) -> RunParameters {
        RunParameters {
            method: self.method,
            record_count,
            initial_condition: self.initial_condition,
            search_key: self.search_key,
            verbose: self.verbose,
        }
    }
}
