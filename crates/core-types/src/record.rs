use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single day of revenue.
///
/// `revenue` is `None` for calendar days that were restored onto the axis
/// but had no observation in the source data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueRecord {
    pub date: NaiveDate,
    pub revenue: Option<f64>,
}

impl RevenueRecord {
    pub fn new(date: NaiveDate, revenue: f64) -> Self {
        Self {
            date,
            revenue: Some(revenue),
        }
    }

    /// A placeholder for a day with no observation.
    pub fn missing(date: NaiveDate) -> Self {
        Self { date, revenue: None }
    }

    pub fn is_missing(&self) -> bool {
        self.revenue.is_none()
    }
}
