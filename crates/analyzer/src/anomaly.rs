use crate::error::AnalyzerError;
use analytics::{AnalyticsEngine, IqrBounds};
use core_types::{RevenueRecord, RevenueSeries};
use serde::{Deserialize, Serialize};

/// Records flagged by the IQR rule, together with the fences used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub bounds: IqrBounds,
    /// In series order. Days without revenue are never flagged.
    pub anomalies: Vec<RevenueRecord>,
}

impl AnomalyReport {
    pub fn count(&self) -> usize {
        self.anomalies.len()
    }

    pub fn above_upper(&self) -> usize {
        self.anomalies
            .iter()
            .filter(|r| r.revenue.is_some_and(|v| v > self.bounds.upper))
            .count()
    }

    pub fn below_lower(&self) -> usize {
        self.anomalies
            .iter()
            .filter(|r| r.revenue.is_some_and(|v| v < self.bounds.lower))
            .count()
    }
}

/// Flags every record whose revenue falls outside `[Q1 - k*IQR, Q3 + k*IQR]`.
///
/// The bounds are computed once over the whole revenue column, gaps excluded.
pub fn detect_anomalies(
    engine: &AnalyticsEngine,
    series: &RevenueSeries,
    multiplier: f64,
) -> Result<AnomalyReport, AnalyzerError> {
    let bounds = engine.iqr_bounds(&series.revenues(), multiplier)?;

    let anomalies: Vec<RevenueRecord> = series
        .iter()
        .filter(|r| r.revenue.is_some_and(|v| bounds.is_outlier(v)))
        .copied()
        .collect();

    Ok(AnomalyReport { bounds, anomalies })
}
