use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum GeneratorError {
    #[error("Invalid generator settings: {0}")]
    InvalidSettings(String),

    #[error("Year {0} cannot be represented as a calendar")]
    InvalidYear(i32),
}
