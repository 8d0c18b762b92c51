//! Error types for the data-loader crate.
//!
//! Every failure here means the dataset is unavailable: callers report it
//! and never run a query against a partially loaded dataset.

use thiserror::Error;

/// Errors that can occur while loading the books and ratings tables
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in a data file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// Expected number of fields in a line doesn't match actual
    #[error("Expected {expected} fields but found {found} in line {line} of {file}")]
    FieldCountMismatch {
        file: String,
        expected: usize,
        found: usize,
        line: usize,
    },
}

impl DataLoadError {
    /// True when the failure is a missing source file rather than bad content
    pub fn is_missing_file(&self) -> bool {
        match self {
            DataLoadError::FileNotFound { .. } => true,
            DataLoadError::IoError(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
