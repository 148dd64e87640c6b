use serde::{Deserialize, Serialize};

/// One row of the event log: the step index and the raw reward observed at it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub step: u64,
    pub outcome_raw: f64,
}

impl EventRecord {
    #[must_use]
    pub fn new(step: u64, outcome_raw: f64) -> Self {
        Self { step, outcome_raw }
    }

    /// A record counts as a win only for a strictly positive reward.
    /// Ties (`0.0`), losses and `NaN` are all unfavorable.
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.outcome_raw > 0.0
    }
}

/// Binary outcome at a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutcomePoint {
    pub step: u64,
    pub is_win: bool,
}

impl OutcomePoint {
    #[must_use]
    pub fn new(step: u64, is_win: bool) -> Self {
        Self { step, is_win }
    }
}

impl From<&EventRecord> for OutcomePoint {
    fn from(record: &EventRecord) -> Self {
        Self {
            step: record.step,
            is_win: record.is_win(),
        }
    }
}

/// Win rate at one step of the log, as drawn on a performance chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingPoint {
    pub step: u64,
    /// Mean outcome over every record up to and including this one.
    pub cumulative_win_rate: f64,
    /// Mean outcome over the trailing window; `None` until the window is full.
    pub rolling_win_rate: Option<f64>,
}
