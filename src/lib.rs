//! # Medir: External-Sort Benchmark Harness
//!
//! Medir drives a pre-built external sort/search program across a matrix of
//! input sizes, extracts its reported performance counters (record reads,
//! key comparisons, block transfers) from the captured text, and renders a
//! comparative chart.
//!
//! ## Pipeline
//!
//! ```text
//! Orchestrator ─> ProcessRunner (capture file) ─> Metric Extractor
//!            └─> ResultSet ─> Chart Renderer (PNG)
//! ```
//!
//! Per-point failures (non-zero exit, timeout, missing metrics) are logged
//! and skipped; only the one-time build precondition is fatal. A chart with
//! fewer series than configured is an accepted outcome; an empty chart is
//! refused.
//!
//! ## Example
//!
//! ```rust
//! use medir::extract::{self, Metric};
//! use medir::params::Mode;
//!
//! let capture = "\
//! Métricas de Pós-processamento:
//! Leituras: 42
//! Comparações: 17
//! ";
//! let record = extract::extract(capture, Mode::Sort)?;
//! assert_eq!(record.get(Metric::Reads), Some(42));
//! assert_eq!(record.get(Metric::Comparisons), Some(17));
//! # Ok::<(), medir::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod chart;
pub mod config;
pub mod error;
pub mod extract;
pub mod orchestrate;
pub mod params;
pub mod runner;

pub use error::{Error, Result};
