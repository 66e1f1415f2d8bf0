use chrono::NaiveDate;
use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum AnalyzerError {
    #[error("The revenue series is empty; nothing to analyze")]
    EmptySeries,

    #[error("Date {0} appears more than once in the raw series")]
    DuplicateDate(NaiveDate),

    #[error("Statistics calculation error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),
}

impl From<CoreError> for AnalyzerError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::DuplicateDate(date) => AnalyzerError::DuplicateDate(date),
        }
    }
}
