//! Crash and recovery measurement around regime switches.
//!
//! For each switch step the analyzer compares the win rate just before the
//! switch with the win rate just after it (the crash), then scans forward for
//! the first window of consecutive records whose win rate is back at or above
//! a threshold (the recovery).
//!
//! # Recovery criterion
//!
//! Recovery is detected on a window of `recovery_window` records rather than
//! on a single point, so one lucky win is not mistaken for a recovered
//! strategy. The reported recovery step is the step of the *first* record of
//! the first qualifying window, i.e. where the sustained run begins. It can
//! precede the record that actually pushed the window over the threshold by up
//! to `recovery_window - 1` records.
//!
//! Every offset from `0` through `len(future) - recovery_window` is checked,
//! so the last full window of the log can qualify.

use regime_recovery_core::{AnalysisConfig, ConfigError, OutcomePoint};
use serde::{Deserialize, Serialize};

use crate::schedule::SwitchSchedule;
use crate::series::OutcomeSeries;
use crate::window::{WindowSelection, WindowStats};

/// Window sizes and threshold for crash/recovery analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrashRecoveryConfig {
    /// Step span before (and including) the switch.
    pub pre_window: u64,
    /// Step span after the switch.
    pub post_window: u64,
    /// Number of consecutive records per recovery window.
    pub recovery_window: usize,
    /// Minimum win rate for a recovery window to qualify.
    pub recovery_threshold: f64,
}

impl Default for CrashRecoveryConfig {
    fn default() -> Self {
        Self::from(&AnalysisConfig::default())
    }
}

impl From<&AnalysisConfig> for CrashRecoveryConfig {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            pre_window: config.pre_window,
            post_window: config.post_window,
            recovery_window: config.recovery_window,
            recovery_threshold: config.recovery_threshold,
        }
    }
}

impl CrashRecoveryConfig {
    /// # Errors
    ///
    /// Returns an error for zero-sized windows or a threshold outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        AnalysisConfig {
            pre_window: self.pre_window,
            post_window: self.post_window,
            recovery_window: self.recovery_window,
            recovery_threshold: self.recovery_threshold,
            ..AnalysisConfig::default()
        }
        .validate()
    }
}

/// Crash and recovery figures for one regime switch.
///
/// Every rate is `None` when its window had no records; dependent figures are
/// `None` as well rather than being computed from a fabricated zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrashRecoveryResult {
    pub switch_step: u64,
    pub pre_samples: usize,
    pub pre_win_rate: Option<f64>,
    pub post_samples: usize,
    pub post_win_rate: Option<f64>,
    /// `pre - post`; positive is a drop, negative an improvement.
    pub crash_magnitude: Option<f64>,
    /// Step of the first record of the first qualifying recovery window.
    pub recovery_step: Option<u64>,
    /// Win rate of that qualifying window.
    pub recovery_win_rate: Option<f64>,
    /// `recovery_step - switch_step`; at least 1 when present.
    pub recovery_lag: Option<u64>,
}

impl CrashRecoveryResult {
    #[must_use]
    pub fn recovered(&self) -> bool {
        self.recovery_step.is_some()
    }
}

/// First qualifying window found by the recovery scan.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Recovery {
    step: u64,
    win_rate: f64,
}

/// Measures crash magnitude and recovery lag for regime switches.
#[derive(Debug, Clone, Default)]
pub struct CrashRecoveryAnalyzer {
    config: CrashRecoveryConfig,
}

impl CrashRecoveryAnalyzer {
    /// Creates an analyzer with default windows (50/50/20) and a 50% threshold.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an analyzer with a validated custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error for zero-sized windows or a threshold outside `[0, 1]`.
    pub fn with_config(config: CrashRecoveryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &CrashRecoveryConfig {
        &self.config
    }

    /// Analyzes a single switch point. Pure: the same input always yields the
    /// same result, and results for different switches never interact.
    #[must_use]
    pub fn analyze(&self, series: &OutcomeSeries, switch_step: u64) -> CrashRecoveryResult {
        let points = series.points();

        let pre = WindowSelection::ending_at(switch_step, self.config.pre_window).select(points);
        let post = WindowSelection::following(switch_step, self.config.post_window).select(points);

        let pre_win_rate = pre.win_rate();
        let post_win_rate = post.win_rate();
        let crash_magnitude = pre_win_rate.zip(post_win_rate).map(|(pre, post)| pre - post);

        let future = series.after(switch_step);
        let recovery = self.scan_recovery(&future);
        let recovery_step = recovery.map(|r| r.step);

        let result = CrashRecoveryResult {
            switch_step,
            pre_samples: pre.samples,
            pre_win_rate,
            post_samples: post.samples,
            post_win_rate,
            crash_magnitude,
            recovery_step,
            recovery_win_rate: recovery.map(|r| r.win_rate),
            recovery_lag: recovery_step.map(|step| step - switch_step),
        };

        tracing::debug!(
            switch_step,
            pre_samples = pre.samples,
            post_samples = post.samples,
            future_len = future.len(),
            recovered = result.recovered(),
            "Analyzed regime switch"
        );

        result
    }

    /// Analyzes every switch in `schedule`, in schedule order.
    #[must_use]
    pub fn analyze_all(
        &self,
        series: &OutcomeSeries,
        schedule: &SwitchSchedule,
    ) -> Vec<CrashRecoveryResult> {
        schedule.iter().map(|step| self.analyze(series, step)).collect()
    }

    /// Slides a `recovery_window`-record window over `future` one record at a
    /// time and returns the first window meeting the threshold.
    ///
    /// The win count is updated incrementally as the window slides, keeping
    /// the scan linear in `future.len()`.
    fn scan_recovery(&self, future: &[OutcomePoint]) -> Option<Recovery> {
        let size = self.config.recovery_window;
        if size == 0 || future.len() < size {
            return None;
        }

        let mut window = WindowSelection::ByCount {
            offset: 0,
            len: size,
        }
        .select(future);

        for offset in 0..=future.len() - size {
            if offset > 0 {
                window.wins -= usize::from(future[offset - 1].is_win);
                window.wins += usize::from(future[offset + size - 1].is_win);
            }

            if let Some(rate) = qualifying_rate(&window, self.config.recovery_threshold) {
                return Some(Recovery {
                    step: future[offset].step,
                    win_rate: rate,
                });
            }
        }

        None
    }
}

fn qualifying_rate(window: &WindowStats, threshold: f64) -> Option<f64> {
    window.win_rate().filter(|&rate| rate >= threshold)
}
