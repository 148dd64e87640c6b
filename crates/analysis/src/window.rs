//! Window selection over an outcome series.
//!
//! Two strategies exist and they differ when steps are sparse or duplicated:
//! - [`WindowSelection::ByStepRange`] keeps every point whose step falls in a
//!   half-open step interval, however many points that is.
//! - [`WindowSelection::ByCount`] takes a fixed number of consecutive points
//!   starting at an index, regardless of the steps they carry.

use regime_recovery_core::OutcomePoint;
use serde::{Deserialize, Serialize};

/// Win/sample counts for one window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowStats {
    pub samples: usize,
    pub wins: usize,
}

impl WindowStats {
    #[must_use]
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a OutcomePoint>) -> Self {
        points.into_iter().fold(Self::default(), |mut acc, p| {
            acc.samples += 1;
            acc.wins += usize::from(p.is_win);
            acc
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples == 0
    }

    /// Fraction of wins, or `None` for an empty window.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn win_rate(&self) -> Option<f64> {
        if self.samples == 0 {
            None
        } else {
            Some(self.wins as f64 / self.samples as f64)
        }
    }
}

/// Which points of a series belong to a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowSelection {
    /// Points with `after < step <= through`. `after: None` means no lower bound.
    ByStepRange { after: Option<u64>, through: u64 },
    /// `len` consecutive points starting at index `offset`.
    ByCount { offset: usize, len: usize },
}

impl WindowSelection {
    /// The `span` steps ending at (and including) `step`.
    ///
    /// When `span` exceeds `step` the range reaches below zero, so every
    /// point up to `step` is included.
    #[must_use]
    pub fn ending_at(step: u64, span: u64) -> Self {
        Self::ByStepRange {
            after: step.checked_sub(span),
            through: step,
        }
    }

    /// The `span` steps immediately after `step`, excluding `step` itself.
    #[must_use]
    pub fn following(step: u64, span: u64) -> Self {
        Self::ByStepRange {
            after: Some(step),
            through: step.saturating_add(span),
        }
    }

    #[must_use]
    pub fn contains_step(&self, step: u64) -> bool {
        match *self {
            Self::ByStepRange { after, through } => {
                after.map_or(true, |lo| step > lo) && step <= through
            }
            Self::ByCount { .. } => false,
        }
    }

    /// Counts the points of `points` that fall in this window.
    ///
    /// A count window running past the end of `points` keeps only the
    /// points that exist.
    #[must_use]
    pub fn select(&self, points: &[OutcomePoint]) -> WindowStats {
        match *self {
            Self::ByStepRange { .. } => {
                WindowStats::from_points(points.iter().filter(|p| self.contains_step(p.step)))
            }
            Self::ByCount { offset, len } => {
                WindowStats::from_points(points.iter().skip(offset).take(len))
            }
        }
    }
}
