//! Configuration loading tests

use std::fs;

use medir::config::ExperimentConfig;
use medir::params::{Method, Mode};
use medir::Error;

#[test]
fn test_from_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("experiment.json");
    fs::write(
        &path,
        r#"{
            "mode": "search",
            "method": "two_way_merge",
            "record_counts": [100, 500],
            "search_key": 170,
            "executable": "./pesquisa",
            "build_command": ["make", "pesquisa"],
            "timeout_seconds": 60
        }"#,
    )
    .unwrap();

    let config = ExperimentConfig::from_file(&path).unwrap();
    assert_eq!(config.mode, Mode::Search);
    assert_eq!(config.method, Method::TwoWayMerge);
    assert_eq!(config.record_counts, vec![100, 500]);
    assert_eq!(config.search_key, Some(170));
    assert_eq!(config.build_command, vec!["make", "pesquisa"]);
    assert_eq!(config.timeout().as_secs(), 60);
}

#[test]
fn test_malformed_json_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("experiment.json");
    fs::write(&path, "{not json").unwrap();

    assert!(matches!(
        ExperimentConfig::from_file(&path),
        Err(Error::Config(_))
    ));
}

#[test]
fn test_invalid_values_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("experiment.json");
    fs::write(&path, r#"{"record_counts": []}"#).unwrap();

    assert!(matches!(
        ExperimentConfig::from_file(&path),
        Err(Error::Config(_))
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.json");

    assert!(matches!(
        ExperimentConfig::from_file(&path),
        Err(Error::Io(_))
    ));
}
