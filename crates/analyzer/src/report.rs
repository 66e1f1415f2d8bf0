use crate::anomaly::AnomalyReport;
use crate::calendar::CalendarReport;
use analytics::{CentralTendency, DescriptiveStats};
use chrono::NaiveDate;
use core_types::RevenueRecord;
use serde::{Deserialize, Serialize};

/// First look at the raw data: size, span, a preview and its `describe()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesOverview {
    pub rows: usize,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// The first rows in file order.
    pub preview: Vec<RevenueRecord>,
    pub stats: DescriptiveStats,
}

/// Mean and median of the raw series next to those of the reloaded clean series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryComparison {
    pub raw: CentralTendency,
    pub clean: CentralTendency,
}

/// Everything one analysis run found, in a form that can be written as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub overview: SeriesOverview,
    pub calendar: CalendarReport,
    pub anomalies: AnomalyReport,
    pub comparison: SummaryComparison,
    pub rolling_window: usize,
    pub restored_rows: usize,
}
