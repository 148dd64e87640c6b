//! Rolling win-rate export CLI command.
//!
//! Writes the per-step cumulative and rolling win rate of an event log to
//! CSV, ready to be plotted against the regime switch steps.

use anyhow::{Context, Result};
use clap::Args;

use regime_recovery_analysis::{auto_window, rolling_series, OutcomeSeries};
use regime_recovery_core::AppConfig;
use regime_recovery_data::{CsvStorage, EventLog};

/// Arguments for the rolling command.
#[derive(Args, Debug, Clone, Default)]
pub struct RollingArgs {
    /// Event log CSV file (searched in results/, ../results/ and . if not found as given)
    pub file: Option<String>,

    /// Rolling window in records (default: 50, or 500 for logs over 5000 records)
    #[arg(long)]
    pub window: Option<usize>,

    /// Output CSV file path
    #[arg(short, long)]
    pub output: String,
}

/// Runs the rolling command.
///
/// # Errors
/// Returns error if the window is zero, the log cannot be loaded, or the
/// output file cannot be written.
pub fn run_rolling(args: RollingArgs, mut config: AppConfig) -> Result<()> {
    if let Some(file) = &args.file {
        config.data.file.clone_from(file);
    }
    if args.window.is_some() {
        config.data.rolling_window = args.window;
    }
    config.data.validate().context("Invalid data parameters")?;

    let log = EventLog::discover(&config.data)
        .with_context(|| format!("Could not load event log '{}'", config.data.file))?;
    let series = OutcomeSeries::from_records(&log.records);

    let window = config
        .data
        .rolling_window
        .unwrap_or_else(|| auto_window(series.len()));
    tracing::info!("Rolling window: {} records", window);

    let points = rolling_series(&series, window);
    CsvStorage::write_rolling(&args.output, &points)
        .with_context(|| format!("Failed to write rolling series to {}", args.output))?;

    println!(
        "Rolling win rate ({} records, window {}) saved to {}",
        points.len(),
        window,
        args.output
    );
    Ok(())
}
