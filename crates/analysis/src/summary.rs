use serde::{Deserialize, Serialize};

use crate::crash::CrashRecoveryResult;

/// Aggregate figures across all analyzed switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub switches: usize,
    pub recovered: usize,
    /// Mean lag over recovered switches only.
    pub mean_recovery_lag: Option<f64>,
    pub max_recovery_lag: Option<u64>,
    /// Mean crash over switches with both windows populated.
    pub mean_crash_magnitude: Option<f64>,
}

impl RunSummary {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_results(results: &[CrashRecoveryResult]) -> Self {
        let lags: Vec<u64> = results.iter().filter_map(|r| r.recovery_lag).collect();
        let crashes: Vec<f64> = results.iter().filter_map(|r| r.crash_magnitude).collect();

        Self {
            switches: results.len(),
            recovered: lags.len(),
            mean_recovery_lag: mean(lags.iter().map(|&l| l as f64)),
            max_recovery_lag: lags.iter().copied().max(),
            mean_crash_magnitude: mean(crashes.iter().copied()),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}
