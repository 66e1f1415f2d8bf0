//! # Charts
//!
//! PNG renderings of the three analysis views: the raw series, the series
//! with its anomalies and the clean series with its trend line.

use crate::layout::{Frame, contiguous_runs};
use analyzer::{AnomalyReport, TrendPoint};
use chrono::{Duration, NaiveDate};
use configuration::ChartSettings;
use core_types::RevenueSeries;
use plotters::coord::types::{RangedCoordf64, RangedCoordi32};
use plotters::prelude::*;
use std::fs;
use std::path::Path;

pub mod error;
pub mod layout;

pub use error::ChartError;

type RevenueChart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordi32, RangedCoordf64>>;

/// Draws charts at a fixed image size.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    width: u32,
    height: u32,
}

impl ChartRenderer {
    pub fn new(settings: &ChartSettings) -> Self {
        Self {
            width: settings.width,
            height: settings.height,
        }
    }

    /// Revenue against date, as loaded.
    pub fn render_raw_series(&self, path: &Path, series: &RevenueSeries) -> Result<(), ChartError> {
        let points = dated_points(series);
        let frame = Frame::fit(&points).ok_or_else(|| ChartError::NoData(path.to_path_buf()))?;
        let line = contiguous_runs(&to_offsets(&frame, &points));

        self.draw(path, "Daily Revenue Over Time (Raw Data)", &frame, |chart| {
            draw_line(chart, line, BLUE.stroke_width(1), "Revenue")
        })
    }

    /// The full series faded, with each anomaly as a red point on top.
    pub fn render_anomalies(
        &self,
        path: &Path,
        series: &RevenueSeries,
        anomalies: &AnomalyReport,
    ) -> Result<(), ChartError> {
        let points = dated_points(series);
        let frame = Frame::fit(&points).ok_or_else(|| ChartError::NoData(path.to_path_buf()))?;
        let line = contiguous_runs(&to_offsets(&frame, &points));
        let marks: Vec<(i32, f64)> = anomalies
            .anomalies
            .iter()
            .filter_map(|r| r.revenue.map(|v| (frame.x(r.date), v)))
            .collect();

        self.draw(path, "Daily Revenue with Detected Anomalies", &frame, |chart| {
            draw_line(chart, line, BLUE.mix(0.4).stroke_width(1), "Revenue")?;

            let style = RED.filled();
            chart
                .draw_series(marks.into_iter().map(|p| Circle::new(p, 5, style)))
                .map_err(|e| e.to_string())?
                .label(format!(
                    "Anomalies (< {:.0} or > {:.0})",
                    anomalies.bounds.lower, anomalies.bounds.upper
                ))
                .legend(move |(x, y)| Circle::new((x + 10, y), 5, style));
            Ok(())
        })
    }

    /// The clean series faded, with the trailing mean drawn bold over it.
    pub fn render_trend(
        &self,
        path: &Path,
        points: &[TrendPoint],
        window: usize,
    ) -> Result<(), ChartError> {
        let revenue: Vec<(NaiveDate, Option<f64>)> =
            points.iter().map(|p| (p.date, p.revenue)).collect();
        let trend: Vec<(NaiveDate, Option<f64>)> =
            points.iter().map(|p| (p.date, p.trend)).collect();
        let frame = Frame::fit(revenue.iter().chain(trend.iter()))
            .ok_or_else(|| ChartError::NoData(path.to_path_buf()))?;

        let revenue_line = contiguous_runs(&to_offsets(&frame, &revenue));
        let trend_line = contiguous_runs(&to_offsets(&frame, &trend));

        self.draw(path, "Clean Daily Revenue with Moving Average", &frame, |chart| {
            draw_line(chart, revenue_line, BLUE.mix(0.35).stroke_width(1), "Revenue")?;
            draw_line(
                chart,
                trend_line,
                RED.stroke_width(3),
                &format!("{window}-day moving average"),
            )
        })
    }

    /// Shared frame: white canvas, dated x axis, revenue y axis, legend.
    fn draw<F>(&self, path: &Path, caption: &str, frame: &Frame, plot: F) -> Result<(), ChartError>
    where
        F: FnOnce(&mut RevenueChart<'_, '_>) -> Result<(), String>,
    {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ChartError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let fail = |message: String| ChartError::Drawing {
            path: path.to_path_buf(),
            message,
        };

        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| fail(e.to_string()))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(caption, ("sans-serif", 22))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(0..frame.last_offset.max(1), frame.y.clone())
            .map_err(|e| fail(e.to_string()))?;

        let start = frame.start;
        let date_label = move |x: &i32| {
            (start + Duration::days(i64::from(*x)))
                .format("%Y-%m-%d")
                .to_string()
        };
        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc("Revenue")
            .x_labels(8)
            .x_label_formatter(&date_label)
            .draw()
            .map_err(|e| fail(e.to_string()))?;

        plot(&mut chart).map_err(fail)?;

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(|e| fail(e.to_string()))?;

        // Surface write failures instead of losing them in the backend's drop.
        root.present().map_err(|e| fail(e.to_string()))?;
        tracing::info!("Chart saved to {}", path.display());
        Ok(())
    }
}

fn dated_points(series: &RevenueSeries) -> Vec<(NaiveDate, Option<f64>)> {
    let mut points: Vec<_> = series.iter().map(|r| (r.date, r.revenue)).collect();
    points.sort_by_key(|(d, _)| *d);
    points
}

fn to_offsets(frame: &Frame, points: &[(NaiveDate, Option<f64>)]) -> Vec<(i32, Option<f64>)> {
    points.iter().map(|&(d, v)| (frame.x(d), v)).collect()
}

fn draw_line(
    chart: &mut RevenueChart<'_, '_>,
    runs: Vec<Vec<(i32, f64)>>,
    style: ShapeStyle,
    label: &str,
) -> Result<(), String> {
    for (i, run) in runs.into_iter().enumerate() {
        let anno = chart
            .draw_series(LineSeries::new(run, style))
            .map_err(|e| e.to_string())?;
        if i == 0 {
            anno.label(label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
        }
    }
    Ok(())
}
