//! # Revenue Analyzer
//!
//! The exploratory analysis of a daily revenue series, as a set of pure steps.
//! Nothing in this crate touches the filesystem: the caller loads the raw
//! series, hands it in, persists what comes back and feeds the reloaded file
//! into the later steps.
//!
//! ## Steps
//!
//! 1. `overview`: row count, date span, preview and descriptive statistics.
//! 2. `prepare`: calendar validation, restoration onto the full daily axis and
//!    IQR anomaly detection.
//! 3. `compare`: mean/median of the raw series against the reloaded clean one.
//! 4. `trend`: trailing moving average of the clean series.

use analytics::AnalyticsEngine;
use configuration::AnalysisSettings;
use core_types::RevenueSeries;

pub mod anomaly;
pub mod calendar;
pub mod error;
pub mod report;
pub mod trend;

pub use anomaly::{AnomalyReport, detect_anomalies};
pub use calendar::{CalendarReport, full_calendar, restore, validate_calendar};
pub use error::AnalyzerError;
pub use report::{AnalysisReport, SeriesOverview, SummaryComparison};
pub use trend::{TrendPoint, rolling_trend};

/// Output of the calendar and anomaly steps.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedSeries {
    pub calendar: CalendarReport,
    /// One record per calendar day; gap days carry no revenue.
    pub restored: RevenueSeries,
    pub anomalies: AnomalyReport,
}

/// The main analysis engine.
pub struct Analyzer {
    config: AnalysisSettings,
    engine: AnalyticsEngine,
}

impl Analyzer {
    pub fn new(config: AnalysisSettings) -> Self {
        Self {
            config,
            engine: AnalyticsEngine::new(),
        }
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.config
    }

    /// Summarises the raw series as loaded, without changing it.
    pub fn overview(&self, raw: &RevenueSeries) -> Result<SeriesOverview, AnalyzerError> {
        let (start, end) = raw.date_range().ok_or(AnalyzerError::EmptySeries)?;
        let stats = self.engine.describe(&raw.revenues())?;

        Ok(SeriesOverview {
            rows: raw.len(),
            start,
            end,
            preview: raw.iter().take(self.config.preview_rows).copied().collect(),
            stats,
        })
    }

    /// Sorts the raw series, restores the missing calendar days and flags
    /// anomalies on the restored series.
    pub fn prepare(&self, raw: &RevenueSeries) -> Result<PreparedSeries, AnalyzerError> {
        if raw.is_empty() {
            return Err(AnalyzerError::EmptySeries);
        }
        raw.ensure_unique_dates()?;

        // 1. Calendar validation
        let sorted = raw.clone().sorted();
        let calendar = validate_calendar(&sorted).ok_or(AnalyzerError::EmptySeries)?;
        if calendar.is_complete() {
            tracing::info!("Calendar is complete: {} days", calendar.expected_days);
        } else {
            tracing::warn!(
                "{} of {} calendar days are missing between {} and {}",
                calendar.missing_days(),
                calendar.expected_days,
                calendar.start,
                calendar.end
            );
        }

        // 2. Restoration
        let axis = full_calendar(calendar.start, calendar.end);
        let restored = restore(&sorted, &axis);
        tracing::debug!(
            raw_rows = sorted.len(),
            restored_rows = restored.len(),
            "Restored the full daily axis"
        );

        // 3. Anomaly detection
        let anomalies = detect_anomalies(&self.engine, &restored, self.config.iqr_multiplier)?;
        if anomalies.count() > 0 {
            tracing::warn!(
                lower = anomalies.bounds.lower,
                upper = anomalies.bounds.upper,
                "{} anomalies flagged",
                anomalies.count()
            );
        } else {
            tracing::info!(
                lower = anomalies.bounds.lower,
                upper = anomalies.bounds.upper,
                "No anomalies outside the IQR bounds"
            );
        }

        Ok(PreparedSeries {
            calendar,
            restored,
            anomalies,
        })
    }

    /// Mean and median of both series, gaps skipped.
    pub fn compare(&self, raw: &RevenueSeries, clean: &RevenueSeries) -> SummaryComparison {
        SummaryComparison {
            raw: self.engine.central_tendency(&raw.revenues()),
            clean: self.engine.central_tendency(&clean.revenues()),
        }
    }

    /// The configured trailing mean over the clean series, in date order.
    pub fn trend(&self, clean: &RevenueSeries) -> Result<Vec<TrendPoint>, AnalyzerError> {
        rolling_trend(
            &self.engine,
            clean,
            self.config.rolling_window,
            self.config.rolling_min_periods,
        )
    }

    /// Bundles the step outputs into one serializable report.
    pub fn report(
        &self,
        overview: SeriesOverview,
        prepared: &PreparedSeries,
        comparison: SummaryComparison,
    ) -> AnalysisReport {
        AnalysisReport {
            overview,
            calendar: prepared.calendar.clone(),
            anomalies: prepared.anomalies.clone(),
            comparison,
            rolling_window: self.config.rolling_window,
            restored_rows: prepared.restored.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::RevenueRecord;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 7, d).unwrap()
    }

    fn analyzer() -> Analyzer {
        Analyzer::new(AnalysisSettings::default())
    }

    #[test]
    fn test_overview_of_unsorted_input() {
        let raw = RevenueSeries::new(vec![
            RevenueRecord::new(day(9), 90.0),
            RevenueRecord::new(day(2), 20.0),
            RevenueRecord::new(day(4), 40.0),
        ]);
        let overview = analyzer().overview(&raw).unwrap();

        assert_eq!(overview.rows, 3);
        assert_eq!(overview.start, day(2));
        assert_eq!(overview.end, day(9));
        assert_eq!(overview.preview.len(), 3);
        assert_eq!(overview.preview[0].date, day(9));
        assert_eq!(overview.stats.count, 3);
    }

    #[test]
    fn test_empty_series_rejected() {
        let empty = RevenueSeries::default();
        assert_eq!(analyzer().overview(&empty).unwrap_err(), AnalyzerError::EmptySeries);
        assert_eq!(analyzer().prepare(&empty).unwrap_err(), AnalyzerError::EmptySeries);
    }

    #[test]
    fn test_duplicate_dates_rejected() {
        let raw = RevenueSeries::new(vec![
            RevenueRecord::new(day(1), 1.0),
            RevenueRecord::new(day(1), 2.0),
        ]);
        assert_eq!(analyzer().prepare(&raw).unwrap_err(), AnalyzerError::DuplicateDate(day(1)));
    }

    #[test]
    fn test_prepare_restores_and_flags() {
        let raw = RevenueSeries::new(vec![
            RevenueRecord::new(day(6), 101.0),
            RevenueRecord::new(day(1), 100.0),
            RevenueRecord::new(day(2), 99.0),
            RevenueRecord::new(day(4), 5000.0),
            RevenueRecord::new(day(5), 100.0),
            RevenueRecord::new(day(7), 98.0),
        ]);
        let prepared = analyzer().prepare(&raw).unwrap();

        assert_eq!(prepared.calendar.missing_dates, vec![day(3)]);
        assert_eq!(prepared.restored.len(), 7);
        assert!(prepared.restored.iter().any(|r| r.date == day(3) && r.is_missing()));
        assert_eq!(prepared.anomalies.count(), 1);
        assert_eq!(prepared.anomalies.anomalies[0].date, day(4));
        assert!(prepared.restored.dates().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_single_day_series() {
        let raw = RevenueSeries::new(vec![RevenueRecord::new(day(1), 10.0)]);
        let prepared = analyzer().prepare(&raw).unwrap();
        assert_eq!(prepared.restored.len(), 1);
        assert_eq!(prepared.anomalies.count(), 0);
    }
}
