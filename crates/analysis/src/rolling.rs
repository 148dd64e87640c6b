//! Rolling and cumulative win-rate series for performance charts.

use regime_recovery_core::RollingPoint;

use crate::series::OutcomeSeries;

/// Rolling window used for short logs.
pub const DEFAULT_ROLLING_WINDOW: usize = 50;
/// Rolling window used once a log exceeds [`LARGE_LOG_THRESHOLD`] records.
pub const LARGE_ROLLING_WINDOW: usize = 500;
pub const LARGE_LOG_THRESHOLD: usize = 5000;

/// Picks a rolling window suited to the log length.
#[must_use]
pub fn auto_window(len: usize) -> usize {
    if len > LARGE_LOG_THRESHOLD {
        LARGE_ROLLING_WINDOW
    } else {
        DEFAULT_ROLLING_WINDOW
    }
}

/// Computes one [`RollingPoint`] per record of `series`.
///
/// The rolling rate covers the trailing `window` records and stays `None`
/// for the first `window - 1` records. A `window` of zero produces no
/// rolling values.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn rolling_series(series: &OutcomeSeries, window: usize) -> Vec<RollingPoint> {
    let points = series.points();
    let mut out = Vec::with_capacity(points.len());
    let mut total_wins = 0usize;
    let mut window_wins = 0usize;

    for (i, point) in points.iter().enumerate() {
        total_wins += usize::from(point.is_win);
        window_wins += usize::from(point.is_win);
        if window > 0 && i >= window {
            window_wins -= usize::from(points[i - window].is_win);
        }

        let seen = i + 1;
        let rolling_win_rate =
            (window > 0 && seen >= window).then(|| window_wins as f64 / window as f64);

        out.push(RollingPoint {
            step: point.step,
            cumulative_win_rate: total_wins as f64 / seen as f64,
            rolling_win_rate,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use regime_recovery_core::OutcomePoint;

    fn series(wins: &[bool]) -> OutcomeSeries {
        OutcomeSeries::from_points(
            wins.iter()
                .enumerate()
                .map(|(i, &w)| OutcomePoint::new(i as u64 + 1, w))
                .collect(),
        )
    }

    #[test]
    fn auto_window_switches_for_large_logs() {
        assert_eq!(auto_window(0), 50);
        assert_eq!(auto_window(5000), 50);
        assert_eq!(auto_window(5001), 500);
    }

    #[test]
    fn rolling_rate_undefined_until_window_full() {
        let points = rolling_series(&series(&[true, false, true, true]), 3);

        assert_eq!(points[0].rolling_win_rate, None);
        assert_eq!(points[1].rolling_win_rate, None);
        assert!((points[2].rolling_win_rate.unwrap() - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(points[3].rolling_win_rate, Some(2.0 / 3.0));
    }

    #[test]
    fn rolling_window_drops_oldest_record() {
        let points = rolling_series(&series(&[true, true, false, false]), 2);

        let rates: Vec<Option<f64>> = points.iter().map(|p| p.rolling_win_rate).collect();
        assert_eq!(rates, vec![None, Some(1.0), Some(0.5), Some(0.0)]);
    }

    #[test]
    fn cumulative_rate_is_running_mean() {
        let points = rolling_series(&series(&[true, false, false, true]), 50);

        let cumulative: Vec<f64> = points.iter().map(|p| p.cumulative_win_rate).collect();
        assert_eq!(cumulative, vec![1.0, 0.5, 1.0 / 3.0, 0.5]);
        assert!(points.iter().all(|p| p.rolling_win_rate.is_none()));
    }

    #[test]
    fn rolling_keeps_steps_and_length() {
        let points = rolling_series(&series(&[false; 7]), 3);

        assert_eq!(points.len(), 7);
        assert_eq!(points[6].step, 7);
    }

    #[test]
    fn zero_window_has_no_rolling_values() {
        let points = rolling_series(&series(&[true, true]), 0);
        assert!(points.iter().all(|p| p.rolling_win_rate.is_none()));
    }

    #[test]
    fn empty_series_yields_empty_output() {
        assert!(rolling_series(&OutcomeSeries::default(), 50).is_empty());
    }
}
