//! Error types for benford-io

use thiserror::Error;

/// Errors that can occur while loading tabular data
#[derive(Debug, Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open file: {0}")]
    OpenFailed(String),

    #[error("File could not be decoded as {encoding}")]
    Encoding { encoding: String },

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Column not found: index {index}, table has {num_columns} columns")]
    ColumnNotFound { index: usize, num_columns: usize },

    #[error("I/O error: {0}")]
    Io(String),
}

/// Result type for I/O operations
pub type IoResult<T> = Result<T, IoError>;

impl From<std::io::Error> for IoError {
    fn from(err: std::io::Error) -> Self {
        IoError::Io(err.to_string())
    }
}

impl From<csv::Error> for IoError {
    fn from(err: csv::Error) -> Self {
        IoError::InvalidFormat(err.to_string())
    }
}
