use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to prepare chart output '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to draw chart '{path}': {message}")]
    Drawing { path: PathBuf, message: String },

    #[error("Nothing to plot for '{0}'")]
    NoData(PathBuf),
}
