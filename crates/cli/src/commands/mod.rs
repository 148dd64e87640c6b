//! CLI commands for regime crash/recovery analysis.

pub mod analyze;
pub mod rolling;

pub use analyze::{run_analyze, AnalyzeArgs};
pub use rolling::{run_rolling, RollingArgs};
