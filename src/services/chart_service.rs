use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use thiserror::Error;

use crate::api::ApiError;
use crate::models::ChartSeries;

/// Single-series chart size in pixels
pub const CHART_SIZE: (u32, u32) = (900, 600);
/// Two stacked panels
pub const STACKED_CHART_SIZE: (u32, u32) = (900, 1000);

const MAX_X_LABELS: usize = 8;

#[derive(Debug, Error)]
pub enum ChartError {
    /// Series shape or symbol rejected before anything was drawn
    #[error("invalid chart input: {0}")]
    InvalidInput(String),
    /// plotters failed while drawing or encoding
    #[error("failed to draw chart: {0}")]
    Draw(String),
    /// External chart program ran but exited unsuccessfully
    #[error("chart process exited with {0}")]
    Process(std::process::ExitStatus),
    /// External chart program could not be started
    #[error("failed to launch chart process: {0}")]
    Spawn(#[source] std::io::Error),
    /// Data for the chart could not be fetched
    #[error(transparent)]
    Fetch(#[from] ApiError),
}

fn draw_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Draw(e.to_string())
}

/// Render `values` as a single red line, one point per label, to a PNG at `path`.
///
/// Nothing is written when the labels and values don't line up.
pub fn render_line_chart(
    path: &Path,
    title: &str,
    labels: &[String],
    values: &[f64],
) -> Result<(), ChartError> {
    let series = ChartSeries::new(title, labels.to_vec(), values.to_vec())?;
    render_series(path, &series)
}

pub fn render_series(path: &Path, series: &ChartSeries) -> Result<(), ChartError> {
    tracing::debug!("🎨 Rendering '{}' ({} points) to {}", series.title(), series.len(), path.display());

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;
    draw_panel(&root, series, &RED)?;
    root.present().map_err(draw_err)?;

    Ok(())
}

/// Render two series as stacked panels in one PNG.
pub fn render_stacked_chart(
    path: &Path,
    upper: &ChartSeries,
    lower: &ChartSeries,
) -> Result<(), ChartError> {
    tracing::debug!(
        "🎨 Rendering stacked chart '{}' / '{}' to {}",
        upper.title(),
        lower.title(),
        path.display()
    );

    let root = BitMapBackend::new(path, STACKED_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let (top, bottom) = root.split_vertically(STACKED_CHART_SIZE.1 / 2);
    draw_panel(&top, upper, &RED)?;
    draw_panel(&bottom, lower, &BLUE)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Categorical X axis: point i sits at x = i and is labelled `labels[i]`.
fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    series: &ChartSeries,
    color: &RGBColor,
) -> Result<(), ChartError> {
    let values = series.values();
    let labels = series.labels();

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let spread = max - min;
    let padding = if spread > 0.0 {
        spread * 0.1
    } else {
        min.abs().max(1.0) * 0.05
    };
    let y_range = (min - padding)..(max + padding);

    // A lone point still needs a non-empty X range
    let x_max = (series.len() - 1).max(1) as f64;

    let mut chart = ChartBuilder::on(area)
        .caption(series.title(), ("sans-serif", 28).into_font())
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..x_max, y_range)
        .map_err(draw_err)?;

    let label_at = |x: &f64| -> String {
        let index = x.round();
        if (index - x).abs() > 1e-6 || index < 0.0 {
            return String::new();
        }
        labels.get(index as usize).cloned().unwrap_or_default()
    };

    chart
        .configure_mesh()
        .x_labels(series.len().min(MAX_X_LABELS))
        .x_label_formatter(&label_at)
        .x_desc("Date")
        .y_desc("Value")
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(LineSeries::new(
            values.iter().enumerate().map(|(i, v)| (i as f64, *v)),
            color.stroke_width(2),
        ))
        .map_err(draw_err)?;

    Ok(())
}
