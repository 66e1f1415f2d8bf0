use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CoreError {
    #[error("Date {0} appears more than once in the series")]
    DuplicateDate(NaiveDate),
}
