#![allow(clippy::format_push_string)]
#![allow(clippy::uninlined_format_args)]

use serde::{Deserialize, Serialize};

use crate::crash::{CrashRecoveryConfig, CrashRecoveryResult};
use crate::summary::RunSummary;

/// Everything produced by one analysis run, as emitted in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Path of the event log that was analyzed.
    pub source: Option<String>,
    pub records: usize,
    pub config: CrashRecoveryConfig,
    pub results: Vec<CrashRecoveryResult>,
    pub summary: RunSummary,
}

impl AnalysisReport {
    #[must_use]
    pub fn new(
        source: Option<String>,
        records: usize,
        config: CrashRecoveryConfig,
        results: Vec<CrashRecoveryResult>,
    ) -> Self {
        let summary = RunSummary::from_results(&results);
        Self {
            source,
            records,
            config,
            results,
            summary,
        }
    }
}

pub struct ReportFormatter;

impl ReportFormatter {
    #[must_use]
    pub fn format(report: &AnalysisReport) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("                 CRASH & RECOVERY ANALYSIS                     \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        if let Some(source) = &report.source {
            output.push_str(&format!("Event Log:             {}\n", source));
        }
        output.push_str(&format!("Records:               {}\n", report.records));
        output.push_str(&format!(
            "Windows:               pre {} / post {} steps, recovery {} records\n",
            report.config.pre_window, report.config.post_window, report.config.recovery_window
        ));
        output.push_str(&format!(
            "Recovery Threshold:    {:.2}%\n",
            report.config.recovery_threshold * 100.0
        ));
        output.push('\n');

        for result in &report.results {
            output.push_str(&Self::format_result(result, report.config.recovery_threshold));
            output.push('\n');
        }

        output.push_str("Summary\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!(
            "Switches Recovered:    {} of {}\n",
            report.summary.recovered, report.summary.switches
        ));
        output.push_str(&format!(
            "Mean Crash:            {}\n",
            report
                .summary
                .mean_crash_magnitude
                .map_or_else(|| "N/A".to_string(), format_pct)
        ));
        match (report.summary.mean_recovery_lag, report.summary.max_recovery_lag) {
            (Some(mean), Some(max)) => {
                output.push_str(&format!("Mean Recovery Lag:     {:.1} steps\n", mean));
                output.push_str(&format!("Max Recovery Lag:      {} steps\n", max));
            }
            _ => output.push_str("Mean Recovery Lag:     N/A (no recoveries)\n"),
        }

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");

        if report.records == 0 {
            output.push_str("\n⚠️  The event log contains no records.\n\n");
        }

        output
    }

    /// Formats the block for a single regime switch.
    #[must_use]
    pub fn format_result(result: &CrashRecoveryResult, threshold: f64) -> String {
        let mut output = String::new();

        output.push_str(&format!("[Regime Switch at Step {}]\n", result.switch_step));
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!(
            "Win Rate Before:       {}\n",
            format_rate(result.pre_win_rate, result.pre_samples)
        ));
        output.push_str(&format!(
            "Win Rate After:        {}\n",
            format_rate(result.post_win_rate, result.post_samples)
        ));

        match result.crash_magnitude {
            Some(crash) if crash >= 0.0 => {
                output.push_str(&format!("Crash Magnitude:       {} drop\n", format_pct(crash)));
            }
            Some(crash) => {
                output.push_str(&format!(
                    "Crash Magnitude:       {} (improved)\n",
                    format_pct(crash)
                ));
            }
            None => output.push_str("Crash Magnitude:       N/A (no data)\n"),
        }

        match (result.recovery_step, result.recovery_lag) {
            (Some(step), Some(lag)) => output.push_str(&format!(
                "Recovery:              >= {} at step {} (lag: {} steps)\n",
                format_pct(threshold),
                step,
                lag
            )),
            _ => output.push_str(&format!(
                "Recovery:              not achieved (>= {} before end of data)\n",
                format_pct(threshold)
            )),
        }

        output
    }
}

fn format_pct(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

fn format_rate(rate: Option<f64>, samples: usize) -> String {
    match rate {
        Some(rate) => format!("{} ({} records)", format_pct(rate), samples),
        None => "N/A (no data)".to_string(),
    }
}
