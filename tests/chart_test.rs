//! Chart renderer tests

use medir::chart::{self, Series};
use medir::extract;
use medir::orchestrate::ResultSet;
use medir::params::Mode;
use medir::Error;

#[test]
fn test_render_writes_png_for_valid_series() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("grafico.png");
    let series = vec![
        Series::for_record_count(100, vec![(120, 400)]),
        Series::for_record_count(2000, vec![(23_896, 39_441)]),
    ];

    chart::render(&series, Mode::Sort, &output).unwrap();
    assert!(output.exists());
    assert!(output.metadata().unwrap().len() > 0);
}

#[test]
fn test_no_series_at_all_refuses_to_write() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("grafico.png");

    let err = chart::render(&[], Mode::Sort, &output).unwrap_err();
    assert!(matches!(err, Error::NoData));
    assert!(!output.exists());
}

#[test]
fn test_groups_with_zero_points_are_skipped_silently() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("grafico.png");
    let series = vec![
        Series::for_record_count(100, vec![]),
        Series::for_record_count(200, vec![(10, 20)]),
    ];

    // One empty group does not poison the chart.
    chart::render(&series, Mode::Sort, &output).unwrap();
    assert!(output.exists());
}

#[test]
fn test_all_groups_empty_counts_as_no_data() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("grafico.png");
    let series = vec![
        Series::for_record_count(100, vec![]),
        Series::for_record_count(200, vec![]),
    ];

    assert!(matches!(
        chart::render(&series, Mode::Sort, &output),
        Err(Error::NoData)
    ));
    assert!(!output.exists());
}

#[test]
fn test_series_from_results_one_point_per_record() {
    let mut results = ResultSet::default();
    let record = extract::extract(
        "Métricas de Pós-processamento:\nLeituras: 42\nComparações: 17\n",
        Mode::Sort,
    )
    .unwrap();
    results.push(100, record);

    let series = chart::series_from_results(&results, Mode::Sort);
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].label, "100 Registros");
    assert_eq!(series[0].points, vec![(42, 17)]);
}

#[test]
fn test_series_from_accumulated_capture_is_multi_point() {
    let metric_series = extract::extract_series(
        "Métricas de Pós-processamento:\n\
         Transferências: 3\nComparações: 9\n\
         Resultados extraídos:\n\
         Transferências: 5\nComparações: 15\n",
        Mode::Search,
    )
    .unwrap();

    let series = chart::series_from_accumulated(500, &metric_series, Mode::Search);
    assert_eq!(series.label, "500 Registros");
    assert_eq!(series.points, vec![(3, 9), (5, 15)]);
}

#[test]
fn test_multi_point_group_renders() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("grafico.png");
    let series = vec![Series::for_record_count(500, vec![(3, 9), (5, 15), (8, 24)])];

    chart::render(&series, Mode::Search, &output).unwrap();
    assert!(output.exists());
}
