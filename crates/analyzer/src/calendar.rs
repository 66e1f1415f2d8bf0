use chrono::NaiveDate;
use core_types::{RevenueRecord, RevenueSeries};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Outcome of checking a series against its own daily calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// `(end - start).days + 1`.
    pub expected_days: usize,
    pub observed_days: usize,
    /// Calendar days with no row in the series, ascending.
    pub missing_dates: Vec<NaiveDate>,
}

impl CalendarReport {
    pub fn missing_days(&self) -> usize {
        self.missing_dates.len()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_dates.is_empty()
    }
}

/// Every day from `start` to `end`, both inclusive. Empty when `end < start`.
pub fn full_calendar(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// Compares the dates present in `series` with the full axis between its
/// first and last day. Returns `None` for an empty series.
pub fn validate_calendar(series: &RevenueSeries) -> Option<CalendarReport> {
    let (start, end) = series.date_range()?;
    let axis = full_calendar(start, end);

    let mut observed = series.dates();
    observed.sort_unstable();
    observed.dedup();

    let missing_dates = axis
        .iter()
        .filter(|d| observed.binary_search(d).is_err())
        .copied()
        .collect();

    Some(CalendarReport {
        start,
        end,
        expected_days: axis.len(),
        observed_days: observed.len(),
        missing_dates,
    })
}

/// Left-joins `series` onto `axis`: one record per axis day, in axis order,
/// carrying the observed revenue or `None` where the day had no row.
///
/// Dates in `series` that are not on the axis are dropped. `series` is
/// expected to hold each date at most once.
pub fn restore(series: &RevenueSeries, axis: &[NaiveDate]) -> RevenueSeries {
    let by_date: HashMap<NaiveDate, Option<f64>> =
        series.iter().map(|r| (r.date, r.revenue)).collect();

    axis.iter()
        .map(|&date| RevenueRecord {
            date,
            revenue: by_date.get(&date).copied().flatten(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 2, d).unwrap()
    }

    #[test]
    fn test_full_calendar_is_inclusive() {
        let axis = full_calendar(day(27), NaiveDate::from_ymd_opt(2023, 3, 2).unwrap());
        assert_eq!(axis.len(), 4);
        assert_eq!(axis[1], day(28));
        assert!(full_calendar(day(2), day(1)).is_empty());
        assert_eq!(full_calendar(day(5), day(5)), vec![day(5)]);
    }

    #[test]
    fn test_validate_calendar_finds_gaps() {
        let series = RevenueSeries::new(vec![
            RevenueRecord::new(day(5), 5.0),
            RevenueRecord::new(day(1), 1.0),
            RevenueRecord::new(day(3), 3.0),
        ]);
        let report = validate_calendar(&series).unwrap();

        assert_eq!(report.start, day(1));
        assert_eq!(report.end, day(5));
        assert_eq!(report.expected_days, 5);
        assert_eq!(report.observed_days, 3);
        assert_eq!(report.missing_dates, vec![day(2), day(4)]);
        assert!(!report.is_complete());
    }

    #[test]
    fn test_validate_calendar_empty() {
        assert!(validate_calendar(&RevenueSeries::default()).is_none());
    }

    #[test]
    fn test_restore_fills_gaps_with_none() {
        let series = RevenueSeries::new(vec![
            RevenueRecord::new(day(3), 3.0),
            RevenueRecord::new(day(1), 1.0),
        ]);
        let axis = full_calendar(day(1), day(3));
        let restored = restore(&series, &axis);

        assert_eq!(restored.len(), 3);
        assert_eq!(restored.dates(), axis);
        assert_eq!(restored.revenues(), vec![Some(1.0), None, Some(3.0)]);
    }
}
