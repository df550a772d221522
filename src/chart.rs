//! Comparative chart rendering
//!
//! Renders one labeled marker series per record-count group, each with a
//! dashed reference segment from the origin to the group's last point, into
//! a single PNG. A rendering session is a plain function call with an
//! explicit present step; there is no global canvas.

use plotters::prelude::*;
use std::path::Path;
use tracing::info;

use crate::error::{Error, Result};
use crate::extract::{Metric, MetricSeries};
use crate::orchestrate::ResultSet;
use crate::params::Mode;

/// One labeled group of (x, y) points, typically every measurement taken
/// for a single record count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    /// Legend label for the group
    pub label: String,
    /// Measured points, in acquisition order
    pub points: Vec<(u64, u64)>,
}

impl Series {
    /// Build a group with the standard "{record_count} Registros" label.
    #[must_use]
    pub fn for_record_count(record_count: u64, points: Vec<(u64, u64)>) -> Self {
        Self {
            label: format!("{record_count} Registros"),
            points,
        }
    }
}

/// Primary (x) and secondary (y) metric charted for a mode.
#[must_use]
pub const fn axes(mode: Mode) -> (Metric, Metric) {
    match mode {
        Mode::Sort => (Metric::Reads, Metric::Comparisons),
        Mode::Search => (Metric::Transfers, Metric::Comparisons),
    }
}

/// One chart series per successful point of a result set.
///
/// Each single-run record contributes exactly one (x, y) point; records
/// somehow lacking a charted metric are skipped silently.
#[must_use]
pub fn series_from_results(results: &ResultSet, mode: Mode) -> Vec<Series> {
    let (x_metric, y_metric) = axes(mode);
    results
        .points()
        .iter()
        .filter_map(|(record_count, record)| {
            let x = record.get(x_metric)?;
            let y = record.get(y_metric)?;
            Some(Series::for_record_count(*record_count, vec![(x, y)]))
        })
        .collect()
}

/// One multi-point chart series from an accumulated capture's extraction.
#[must_use]
pub fn series_from_accumulated(record_count: u64, series: &MetricSeries, mode: Mode) -> Series {
    let (x_metric, y_metric) = axes(mode);
    Series::for_record_count(record_count, series.points(x_metric, y_metric))
}

struct ChartText {
    title: &'static str,
    x_desc: &'static str,
    y_desc: &'static str,
}

const fn text_for(mode: Mode) -> ChartText {
    match mode {
        Mode::Sort => ChartText {
            title: "Comparações vs Leituras (Pós-processamento)",
            x_desc: "Leituras",
            y_desc: "Comparações",
        },
        Mode::Search => ChartText {
            title: "Comparações vs Transferências (Pós-processamento)",
            x_desc: "Transferências",
            y_desc: "Comparações",
        },
    }
}

/// Thousands-separated tick label.
fn thousands(value: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = value.round().max(0.0) as u64;
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn chart_err<E: std::fmt::Display>(err: E) -> Error {
    Error::Chart(err.to_string())
}

/// Render all groups into a single PNG at `output`.
///
/// Groups with zero points are skipped silently. Axis ranges start at the
/// origin so every dashed reference segment is visible in full.
///
/// # Errors
///
/// [`Error::NoData`] when no group has a single usable point; in that case
/// no image file is written. Otherwise backend errors surface as
/// [`Error::Chart`].
#[allow(clippy::cast_precision_loss)]
pub fn render(series: &[Series], mode: Mode, output: &Path) -> Result<()> {
    let usable: Vec<&Series> = series.iter().filter(|s| !s.points.is_empty()).collect();
    if usable.is_empty() {
        return Err(Error::NoData);
    }

    let x_max = usable
        .iter()
        .flat_map(|s| &s.points)
        .map(|&(x, _)| x)
        .max()
        .unwrap_or(0)
        .max(1) as f64
        * 1.05;
    let y_max = usable
        .iter()
        .flat_map(|s| &s.points)
        .map(|&(_, y)| y)
        .max()
        .unwrap_or(0)
        .max(1) as f64
        * 1.05;

    let text = text_for(mode);
    let root = BitMapBackend::new(output, (1000, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(text.title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc(text.x_desc)
        .y_desc(text.y_desc)
        .x_label_formatter(&|x| thousands(*x))
        .y_label_formatter(&|y| thousands(*y))
        .draw()
        .map_err(chart_err)?;

    for (idx, group) in usable.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        #[allow(clippy::cast_precision_loss)]
        let points: Vec<(f64, f64)> = group
            .points
            .iter()
            .map(|&(x, y)| (x as f64, y as f64))
            .collect();

        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 5, color.filled())),
            )
            .map_err(chart_err)?
            .label(group.label.clone())
            .legend(move |(x, y)| Circle::new((x, y), 5, color.filled()));

        // Unlabeled dashed reference from the origin to the last point.
        if let Some(&(x, y)) = points.last() {
            chart
                .draw_series(DashedLineSeries::new(
                    vec![(0.0, 0.0), (x, y)],
                    6,
                    4,
                    ShapeStyle {
                        color: BLACK.mix(0.35),
                        filled: false,
                        stroke_width: 1,
                    },
                ))
                .map_err(chart_err)?;
        }
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(chart_err)?;
    root.present().map_err(chart_err)?;

    info!(path = %output.display(), "chart written");
    Ok(())
}
