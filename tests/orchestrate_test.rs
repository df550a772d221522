//! Orchestrator tests against a fake process runner

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

use medir::config::ExperimentConfig;
use medir::extract::Metric;
use medir::orchestrate::{self, PointStatus};
use medir::params::RunParameters;
use medir::runner::ProcessRunner;
use medir::Error;

/// Returns canned text per record count; `None` simulates a failed run.
struct CannedRunner {
    outputs: HashMap<u64, Option<String>>,
    calls: RefCell<Vec<u64>>,
}

impl CannedRunner {
    fn new(outputs: HashMap<u64, Option<String>>) -> Self {
        Self {
            outputs,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl ProcessRunner for CannedRunner {
    fn run(&self, params: &RunParameters) -> medir::Result<String> {
        self.calls.borrow_mut().push(params.record_count);
        match self.outputs.get(&params.record_count) {
            Some(Some(text)) => Ok(text.clone()),
            Some(None) => Err(Error::RunFailed {
                command: format!("./ordena 3 {} 1", params.record_count),
                status: "2".to_string(),
                capture: PathBuf::from("/dev/null"),
            }),
            None => panic!("unexpected record count {}", params.record_count),
        }
    }
}

fn sort_capture(reads: u64, comparisons: u64) -> String {
    format!("Métricas de Pós-processamento:\nLeituras: {reads}\nComparações: {comparisons}\n")
}

fn no_build_config() -> ExperimentConfig {
    ExperimentConfig {
        build_command: vec![],
        ..ExperimentConfig::default()
    }
}

#[test]
fn test_failed_point_is_omitted_and_loop_continues() {
    let runner = CannedRunner::new(HashMap::from([
        (100, Some(sort_capture(10, 20))),
        (200, None),
        (2000, Some(sort_capture(1000, 2000))),
    ]));
    let config = no_build_config();

    let (results, reports) = orchestrate::run_experiment(&config, &runner).unwrap();

    assert_eq!(*runner.calls.borrow(), vec![100, 200, 2000]);
    assert_eq!(results.len(), 2);
    assert_eq!(results.points()[0].0, 100);
    assert_eq!(results.points()[1].0, 2000);
    assert_eq!(results.points()[1].1.get(Metric::Reads), Some(1000));

    let statuses: Vec<PointStatus> = reports.iter().map(|r| r.status()).collect();
    assert_eq!(
        statuses,
        vec![PointStatus::Success, PointStatus::Failed, PointStatus::Success]
    );
}

#[test]
fn test_extraction_failure_is_also_non_fatal() {
    let runner = CannedRunner::new(HashMap::from([
        (100, Some("garbage with no marker\nLeituras: 5\n".to_string())),
        (200, Some(sort_capture(7, 9))),
        (2000, Some(sort_capture(70, 90))),
    ]));
    let config = no_build_config();

    let (results, reports) = orchestrate::run_experiment(&config, &runner).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(reports[0].status(), PointStatus::Failed);
    assert_eq!(reports[0].record_count(), 100);
}

#[test]
fn test_all_points_failing_yields_empty_result_set_without_error() {
    let runner = CannedRunner::new(HashMap::from([(100, None), (200, None), (2000, None)]));
    let config = no_build_config();

    let (results, reports) = orchestrate::run_experiment(&config, &runner).unwrap();
    assert!(results.is_empty());
    assert_eq!(reports.len(), 3);
    assert!(reports.iter().all(|r| r.status() == PointStatus::Failed));
}

#[test]
fn test_insertion_order_follows_configured_matrix() {
    let runner = CannedRunner::new(HashMap::from([
        (2000, Some(sort_capture(3, 4))),
        (100, Some(sort_capture(1, 2))),
    ]));
    let config = ExperimentConfig {
        record_counts: vec![2000, 100],
        ..no_build_config()
    };

    let (results, _) = orchestrate::run_experiment(&config, &runner).unwrap();
    let counts: Vec<u64> = results.points().iter().map(|(n, _)| *n).collect();
    assert_eq!(counts, vec![2000, 100]);
}

#[test]
fn test_run_reports_carry_timestamps() {
    let runner = CannedRunner::new(HashMap::from([(100, Some(sort_capture(1, 1)))]));
    let config = ExperimentConfig {
        record_counts: vec![100],
        ..no_build_config()
    };

    let (_, reports) = orchestrate::run_experiment(&config, &runner).unwrap();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].started_at() <= reports[0].ended_at());
}

#[cfg(unix)]
#[test]
fn test_build_failure_is_fatal_before_any_run() {
    let runner = CannedRunner::new(HashMap::new());
    let config = ExperimentConfig {
        build_command: vec!["false".to_string()],
        ..ExperimentConfig::default()
    };

    let err = orchestrate::run_experiment(&config, &runner).unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(err, Error::BuildFailed { .. }));
    assert!(runner.calls.borrow().is_empty());
}

#[cfg(unix)]
#[test]
fn test_successful_build_step_proceeds() {
    let runner = CannedRunner::new(HashMap::from([(100, Some(sort_capture(1, 1)))]));
    let config = ExperimentConfig {
        build_command: vec!["true".to_string()],
        record_counts: vec![100],
        ..ExperimentConfig::default()
    };

    let (results, _) = orchestrate::run_experiment(&config, &runner).unwrap();
    assert_eq!(results.len(), 1);
}
