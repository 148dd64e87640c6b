//! Regime switch schedules.

use regime_recovery_core::AnalysisConfig;
use serde::{Deserialize, Serialize};

/// Ordered, de-duplicated set of steps at which the regime changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SwitchSchedule(Vec<u64>);

impl SwitchSchedule {
    /// Builds a schedule from arbitrary steps, sorting and removing duplicates.
    #[must_use]
    pub fn explicit(steps: impl IntoIterator<Item = u64>) -> Self {
        let mut steps: Vec<u64> = steps.into_iter().collect();
        steps.sort_unstable();
        steps.dedup();
        Self(steps)
    }

    /// Every positive multiple of `interval` up to and including `last_step`.
    ///
    /// An `interval` of zero yields an empty schedule.
    #[must_use]
    pub fn every(interval: u64, last_step: u64) -> Self {
        let mut steps = Vec::new();
        if interval == 0 {
            return Self(steps);
        }

        let mut step = interval;
        while step <= last_step {
            steps.push(step);
            match step.checked_add(interval) {
                Some(next) => step = next,
                None => break,
            }
        }
        Self(steps)
    }

    /// Resolves the configured schedule against a log ending at `last_step`.
    ///
    /// A fixed interval takes precedence over explicit switch points. An
    /// interval with no log (`last_step` of `None`) yields no switches.
    #[must_use]
    pub fn from_config(config: &AnalysisConfig, last_step: Option<u64>) -> Self {
        match config.switch_every {
            Some(interval) => last_step.map_or_else(Self::default, |last| Self::every(interval, last)),
            None => Self::explicit(config.switch_points.iter().copied()),
        }
    }

    #[must_use]
    pub fn steps(&self) -> &[u64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<u64> for SwitchSchedule {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        Self::explicit(iter)
    }
}
