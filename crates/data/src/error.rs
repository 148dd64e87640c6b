//! Error types for event log discovery and parsing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating, reading, or writing log files.
#[derive(Debug, Error)]
pub enum DataError {
    /// No candidate path exists.
    #[error("{file} not found (tried: {})", display_paths(.tried))]
    NotFound {
        /// The file name that was searched for.
        file: String,
        /// Every path checked, in order.
        tried: Vec<PathBuf>,
    },

    /// The header row lacks a required column.
    #[error("column '{column}' not found in {path} (available: {})", .available.join(", "))]
    MissingColumn {
        /// The column that was requested.
        column: String,
        /// The file being read.
        path: PathBuf,
        /// Header names present in the file.
        available: Vec<String>,
    },

    /// A cell could not be parsed as the expected numeric type.
    #[error("invalid {column} value '{value}' on line {line} of {path}")]
    InvalidValue {
        /// The file being read.
        path: PathBuf,
        /// 1-based line number in the file.
        line: u64,
        /// Column name.
        column: String,
        /// Raw cell content.
        value: String,
    },

    /// Underlying CSV reader/writer error.
    #[error("CSV error in {path}: {source}")]
    Csv {
        /// The file being read or written.
        path: PathBuf,
        /// The CSV error.
        #[source]
        source: csv::Error,
    },

    /// Filesystem error.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The I/O error.
        #[source]
        source: std::io::Error,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result alias for data operations.
pub type Result<T> = std::result::Result<T, DataError>;
