//! Event log access for regime crash/recovery analysis.
//!
//! This crate provides:
//! - Discovery of the log file across candidate directories
//! - CSV parsing of `(step, reward)` records by header name
//! - CSV export of rolling win-rate series

pub mod csv_storage;
pub mod error;
pub mod event_log;
pub mod locator;

pub use csv_storage::CsvStorage;
pub use error::DataError;
pub use event_log::{EventLog, LogColumns};
pub use locator::{candidate_paths, resolve_log_path, SearchOrder};
