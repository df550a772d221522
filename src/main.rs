//! medir CLI: drive the benchmark matrix and render the comparison chart.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use medir::chart;
use medir::config::ExperimentConfig;
use medir::orchestrate;
use medir::params::{Method, Mode};
use medir::runner::CommandRunner;

#[derive(Parser)]
#[command(
    about = "Benchmark an external sort/search program across a matrix of input sizes and chart its performance counters"
)]
struct Args {
    /// Experiment configuration file (JSON); flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Algorithm variant token (1 = 2F Fitas, 2 = F + 1 Fitas, 3 = Quicksort Externo)
    #[arg(long)]
    method: Option<u8>,

    /// Benchmark mode (sort or search)
    #[arg(long)]
    mode: Option<String>,

    /// Record counts to sweep, comma separated
    #[arg(long, value_delimiter = ',')]
    sizes: Vec<u64>,

    /// Key to search for (search mode)
    #[arg(long)]
    key: Option<i64>,

    /// Path of the external executable
    #[arg(long)]
    executable: Option<PathBuf>,

    /// Skip the build step and use the executable as-is
    #[arg(long)]
    no_build: bool,

    /// Pass the external program's verbose flag
    #[arg(long)]
    verbose: bool,
}

fn apply_overrides(config: &mut ExperimentConfig, args: &Args) -> anyhow::Result<()> {
    if let Some(token) = args.method {
        config.method =
            Method::from_token(token).context("method token must be 1, 2 or 3")?;
    }
    if let Some(mode) = args.mode.as_deref() {
        config.mode = match mode {
            "sort" => Mode::Sort,
            "search" => Mode::Search,
            other => anyhow::bail!("unknown mode `{other}`, expected sort or search"),
        };
    }
    if !args.sizes.is_empty() {
        config.record_counts.clone_from(&args.sizes);
    }
    if args.key.is_some() {
        config.search_key = args.key;
    }
    if let Some(executable) = &args.executable {
        config.executable.clone_from(executable);
    }
    if args.no_build {
        config.build_command.clear();
    }
    if args.verbose {
        config.verbose = true;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => ExperimentConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ExperimentConfig::default(),
    };
    apply_overrides(&mut config, &args)?;
    config.validate()?;

    let runner = CommandRunner::from_config(&config);
    let (results, reports) = orchestrate::run_experiment(&config, &runner)?;
    info!(
        configured = reports.len(),
        succeeded = results.len(),
        "experiment finished"
    );

    let series = chart::series_from_results(&results, config.mode);
    match chart::render(&series, config.mode, &config.chart_output()) {
        Ok(()) => Ok(()),
        // A totally empty chart is refused, not written; the partial-results
        // case already rendered with fewer series.
        Err(medir::Error::NoData) => {
            error!("no valid data to chart, image not written");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
