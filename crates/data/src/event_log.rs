//! CSV event log reader.
//!
//! Reads `(step, reward)` pairs out of the simulation's per-step log. Columns
//! are located by header name, so extra columns and column order do not
//! matter.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use regime_recovery_core::{DataConfig, EventRecord};

use crate::error::{DataError, Result};
use crate::locator::{resolve_log_path, SearchOrder};

/// Column names used to pull events out of a log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogColumns {
    pub step: String,
    pub outcome: String,
}

impl Default for LogColumns {
    fn default() -> Self {
        Self {
            step: "Step".to_string(),
            outcome: "Reward".to_string(),
        }
    }
}

impl From<&DataConfig> for LogColumns {
    fn from(config: &DataConfig) -> Self {
        Self {
            step: config.step_column.clone(),
            outcome: config.outcome_column.clone(),
        }
    }
}

/// A fully loaded event log and the path it was read from.
#[derive(Debug, Clone)]
pub struct EventLog {
    pub path: PathBuf,
    pub records: Vec<EventRecord>,
}

impl EventLog {
    /// Locates the configured log file and reads it.
    ///
    /// # Errors
    ///
    /// Returns an error if no candidate path exists or the file cannot be parsed.
    pub fn discover(config: &DataConfig) -> Result<Self> {
        let path = resolve_log_path(
            &config.file,
            &config.search_dirs,
            SearchOrder::for_config(config),
        )?;
        Self::from_csv(path, &LogColumns::from(config))
    }

    /// Reads an event log from a CSV file with a header row.
    ///
    /// Records keep file order. A step lower than its predecessor is logged
    /// as a warning but not reordered.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened
    /// - A required column is missing from the header
    /// - A step is not a non-negative integer or a reward is not a number
    pub fn from_csv(path: impl AsRef<Path>, columns: &LogColumns) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let csv_err = |source| DataError::Csv {
            path: path.clone(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(csv_err)?;

        let headers = reader.headers().map_err(csv_err)?.clone();
        let step_idx = column_index(&headers, &columns.step, &path)?;
        let outcome_idx = column_index(&headers, &columns.outcome, &path)?;

        let mut records = Vec::new();
        let mut out_of_order = 0usize;

        for row in reader.records() {
            let row = row.map_err(csv_err)?;
            let line = row.position().map_or(0, csv::Position::line);

            let step: u64 = parse_cell(&row, step_idx, &columns.step, line, &path)?;
            let outcome_raw: f64 = parse_cell(&row, outcome_idx, &columns.outcome, line, &path)?;

            if records
                .last()
                .is_some_and(|prev: &EventRecord| step < prev.step)
            {
                out_of_order += 1;
            }
            records.push(EventRecord::new(step, outcome_raw));
        }

        if out_of_order > 0 {
            tracing::warn!(
                "{} records in {} have a step lower than the previous record",
                out_of_order,
                path.display()
            );
        }

        tracing::info!("Loaded {} events from {}", records.len(), path.display());

        Ok(Self { path, records })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Highest step in the log, if any.
    #[must_use]
    pub fn last_step(&self) -> Option<u64> {
        self.records.iter().map(|r| r.step).max()
    }
}

fn column_index(headers: &csv::StringRecord, name: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| DataError::MissingColumn {
            column: name.to_string(),
            path: path.to_path_buf(),
            available: headers.iter().map(str::to_string).collect(),
        })
}

fn parse_cell<T: FromStr>(
    row: &csv::StringRecord,
    idx: usize,
    column: &str,
    line: u64,
    path: &Path,
) -> Result<T> {
    let raw = row.get(idx).unwrap_or("");
    raw.parse().map_err(|_| DataError::InvalidValue {
        path: path.to_path_buf(),
        line,
        column: column.to_string(),
        value: raw.to_string(),
    })
}
