//! Binary outcome series built from raw event records.

use regime_recovery_core::{EventRecord, OutcomePoint};
use serde::{Deserialize, Serialize};

/// Step-ordered win/loss series, one point per event record.
///
/// Built 1:1 from the input records: no filtering, no reordering, and
/// duplicate steps stay as separate points.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeSeries {
    points: Vec<OutcomePoint>,
}

impl OutcomeSeries {
    /// Builds the series from event records, classifying `outcome_raw > 0` as a win.
    #[must_use]
    pub fn from_records(records: &[EventRecord]) -> Self {
        Self {
            points: records.iter().map(OutcomePoint::from).collect(),
        }
    }

    #[must_use]
    pub fn from_points(points: Vec<OutcomePoint>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[OutcomePoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn wins(&self) -> usize {
        self.points.iter().filter(|p| p.is_win).count()
    }

    /// Highest step present, if any.
    #[must_use]
    pub fn last_step(&self) -> Option<u64> {
        self.points.iter().map(|p| p.step).max()
    }

    /// Points strictly after `step`, in series order.
    #[must_use]
    pub fn after(&self, step: u64) -> Vec<OutcomePoint> {
        self.points.iter().copied().filter(|p| p.step > step).collect()
    }
}

impl From<&[EventRecord]> for OutcomeSeries {
    fn from(records: &[EventRecord]) -> Self {
        Self::from_records(records)
    }
}
