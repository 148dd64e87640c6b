use std::fs::File;
use std::path::Path;

use csv::Writer;
use regime_recovery_core::RollingPoint;

use crate::error::{DataError, Result};

pub struct CsvStorage;

impl CsvStorage {
    /// Writes a rolling win-rate series for plotting.
    ///
    /// Format: step,cumulative_win_rate,rolling_win_rate
    ///
    /// Steps where the rolling window is not yet full get an empty
    /// `rolling_win_rate` cell.
    ///
    /// # Errors
    /// Returns error if file cannot be created or writing fails
    pub fn write_rolling(path: impl AsRef<Path>, points: &[RollingPoint]) -> Result<()> {
        let path = path.as_ref();
        let csv_err = |source| DataError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = Writer::from_writer(file);

        writer
            .write_record(["step", "cumulative_win_rate", "rolling_win_rate"])
            .map_err(csv_err)?;

        for point in points {
            writer
                .write_record(&[
                    point.step.to_string(),
                    format!("{:.4}", point.cumulative_win_rate),
                    point
                        .rolling_win_rate
                        .map(|r| format!("{r:.4}"))
                        .unwrap_or_default(),
                ])
                .map_err(csv_err)?;
        }

        writer.flush().map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!("Wrote {} rolling points to {}", points.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn writes_header_and_blank_cells_for_undefined_rates() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("rolling.csv");
        let points = [
            RollingPoint {
                step: 1,
                cumulative_win_rate: 1.0,
                rolling_win_rate: None,
            },
            RollingPoint {
                step: 2,
                cumulative_win_rate: 0.5,
                rolling_win_rate: Some(0.5),
            },
        ];

        CsvStorage::write_rolling(&path, &points).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "step,cumulative_win_rate,rolling_win_rate\n1,1.0000,\n2,0.5000,0.5000\n"
        );
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("missing_dir").join("rolling.csv");

        let err = CsvStorage::write_rolling(&path, &[]).unwrap_err();

        assert!(matches!(err, DataError::Io { .. }));
    }
}
