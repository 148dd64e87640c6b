//! Crash and recovery analysis of win/loss series around regime switches.
//!
//! Given an event log reduced to a binary [`OutcomeSeries`] and a
//! [`SwitchSchedule`] of known regime boundaries, the
//! [`CrashRecoveryAnalyzer`] reports for each switch how far the win rate
//! dropped and how many steps it took to climb back to a threshold.
//!
//! No I/O happens here; loading logs and printing reports live in the data
//! and CLI crates.

pub mod crash;
pub mod report;
pub mod rolling;
pub mod schedule;
pub mod series;
pub mod summary;
pub mod window;

pub use crash::{CrashRecoveryAnalyzer, CrashRecoveryConfig, CrashRecoveryResult};
pub use report::{AnalysisReport, ReportFormatter};
pub use rolling::{auto_window, rolling_series};
pub use schedule::SwitchSchedule;
pub use series::OutcomeSeries;
pub use summary::RunSummary;
pub use window::{WindowSelection, WindowStats};
