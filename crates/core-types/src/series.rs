use crate::error::CoreError;
use crate::record::RevenueRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An ordered collection of daily revenue records.
///
/// The series makes no ordering promise on its own. Callers that need
/// chronological order call [`RevenueSeries::sort_by_date`] first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevenueSeries {
    records: Vec<RevenueRecord>,
}

impl RevenueSeries {
    pub fn new(records: Vec<RevenueRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RevenueRecord> {
        self.records.iter()
    }

    /// Stable ascending sort by date.
    pub fn sort_by_date(&mut self) {
        self.records.sort_by_key(|r| r.date);
    }

    /// Consumes the series and returns it sorted by date.
    pub fn sorted(mut self) -> Self {
        self.sort_by_date();
        self
    }

    /// The earliest and latest dates present, or `None` for an empty series.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.first()?.date;
        Some(self.records.iter().fold((first, first), |(min, max), r| {
            (min.min(r.date), max.max(r.date))
        }))
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.records.iter().map(|r| r.date).collect()
    }

    /// The revenue column, including gaps.
    pub fn revenues(&self) -> Vec<Option<f64>> {
        self.records.iter().map(|r| r.revenue).collect()
    }

    /// Number of records with no revenue value.
    pub fn missing_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_missing()).count()
    }

    /// Fails on the first date that occurs twice.
    pub fn ensure_unique_dates(&self) -> Result<(), CoreError> {
        let mut seen = HashSet::with_capacity(self.records.len());
        for record in &self.records {
            if !seen.insert(record.date) {
                return Err(CoreError::DuplicateDate(record.date));
            }
        }
        Ok(())
    }
}

impl From<Vec<RevenueRecord>> for RevenueSeries {
    fn from(records: Vec<RevenueRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<RevenueRecord> for RevenueSeries {
    fn from_iter<I: IntoIterator<Item = RevenueRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RevenueSeries {
    type Item = &'a RevenueRecord;
    type IntoIter = std::slice::Iter<'a, RevenueRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, d).unwrap()
    }

    #[test]
    fn test_sort_and_range() {
        let series = RevenueSeries::new(vec![
            RevenueRecord::new(day(3), 30.0),
            RevenueRecord::new(day(1), 10.0),
            RevenueRecord::missing(day(2)),
        ])
        .sorted();

        assert_eq!(series.dates(), vec![day(1), day(2), day(3)]);
        assert_eq!(series.date_range(), Some((day(1), day(3))));
        assert_eq!(series.revenues(), vec![Some(10.0), None, Some(30.0)]);
        assert_eq!(series.missing_count(), 1);
    }

    #[test]
    fn test_empty_series_has_no_range() {
        assert_eq!(RevenueSeries::default().date_range(), None);
    }

    #[test]
    fn test_duplicate_dates_rejected() {
        let series = RevenueSeries::new(vec![
            RevenueRecord::new(day(1), 1.0),
            RevenueRecord::new(day(2), 2.0),
            RevenueRecord::new(day(1), 3.0),
        ]);
        assert_eq!(
            series.ensure_unique_dates(),
            Err(CoreError::DuplicateDate(day(1)))
        );
    }
}
