use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("'{path}' has no '{column}' column")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Invalid date '{value}' on line {line} of '{path}'")]
    InvalidDate {
        path: PathBuf,
        line: u64,
        value: String,
    },
}
