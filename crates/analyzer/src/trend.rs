use crate::error::AnalyzerError;
use analytics::AnalyticsEngine;
use chrono::NaiveDate;
use core_types::RevenueSeries;
use serde::{Deserialize, Serialize};

/// One row of the clean series with its trailing-mean trend value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub revenue: Option<f64>,
    pub trend: Option<f64>,
}

/// Sorts `series` by date and attaches a `window`-row trailing mean.
pub fn rolling_trend(
    engine: &AnalyticsEngine,
    series: &RevenueSeries,
    window: usize,
    min_periods: usize,
) -> Result<Vec<TrendPoint>, AnalyzerError> {
    let mut sorted = series.clone();
    sorted.sort_by_date();

    let trend = engine.rolling_mean(&sorted.revenues(), window, min_periods)?;

    Ok(sorted
        .iter()
        .zip(trend)
        .map(|(record, trend)| TrendPoint {
            date: record.date,
            revenue: record.revenue,
            trend,
        })
        .collect())
}
