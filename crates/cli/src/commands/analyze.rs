//! Crash/recovery analysis CLI command.
//!
//! Loads an event log, measures the win-rate crash and recovery lag around
//! each regime switch, and prints a text or JSON report.

use anyhow::{anyhow, Context, Result};
use clap::Args;

use regime_recovery_analysis::{
    AnalysisReport, CrashRecoveryAnalyzer, CrashRecoveryConfig, OutcomeSeries, ReportFormatter,
    SwitchSchedule,
};
use regime_recovery_core::AppConfig;
use regime_recovery_data::EventLog;

/// Arguments for the analyze command.
#[derive(Args, Debug, Clone, Default)]
pub struct AnalyzeArgs {
    /// Event log CSV file (searched in results/, ../results/ and . if not found as given)
    pub file: Option<String>,

    /// Comma-separated regime switch steps (default from config: 300,600,900)
    #[arg(long, value_delimiter = ',', conflicts_with = "switch_every")]
    pub switch_points: Option<Vec<u64>>,

    /// Place a regime switch at every multiple of this many steps
    #[arg(long)]
    pub switch_every: Option<u64>,

    /// Steps before the switch used for the pre-switch win rate
    #[arg(long)]
    pub pre_window: Option<u64>,

    /// Steps after the switch used for the post-switch win rate
    #[arg(long)]
    pub post_window: Option<u64>,

    /// Records per recovery window
    #[arg(long)]
    pub recovery_window: Option<usize>,

    /// Win rate a recovery window must reach (0.0 - 1.0)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Step column name
    #[arg(long)]
    pub step_column: Option<String>,

    /// Outcome (reward) column name
    #[arg(long)]
    pub outcome_column: Option<String>,

    /// Output format: text, json (default: text)
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Also write the JSON report to this file
    #[arg(long)]
    pub output: Option<String>,
}

/// Output format for analysis reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// Parses an output format name.
    ///
    /// # Errors
    /// Returns error for anything other than `text` or `json`.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!(
                "Unknown format: '{}'. Valid formats: text, json",
                s
            )),
        }
    }
}

impl AnalyzeArgs {
    /// Applies command-line overrides on top of the loaded configuration.
    ///
    /// # Errors
    /// Returns error if the resulting configuration is invalid.
    pub fn apply_to(&self, config: &mut AppConfig) -> Result<()> {
        if let Some(file) = &self.file {
            config.data.file.clone_from(file);
        }
        if let Some(points) = &self.switch_points {
            config.analysis.switch_points.clone_from(points);
            config.analysis.switch_every = None;
        }
        if let Some(every) = self.switch_every {
            config.analysis.switch_every = Some(every);
        }
        if let Some(pre) = self.pre_window {
            config.analysis.pre_window = pre;
        }
        if let Some(post) = self.post_window {
            config.analysis.post_window = post;
        }
        if let Some(window) = self.recovery_window {
            config.analysis.recovery_window = window;
        }
        if let Some(threshold) = self.threshold {
            config.analysis.recovery_threshold = threshold;
        }
        if let Some(column) = &self.step_column {
            config.data.step_column.clone_from(column);
        }
        if let Some(column) = &self.outcome_column {
            config.data.outcome_column.clone_from(column);
        }

        config.validate().context("Invalid analysis parameters")?;
        Ok(())
    }
}

/// Runs the analysis and returns the report without printing it.
///
/// # Errors
/// Returns error if parameters are invalid or the event log cannot be loaded.
pub fn build_report(args: &AnalyzeArgs, mut config: AppConfig) -> Result<AnalysisReport> {
    args.apply_to(&mut config)?;

    let log = EventLog::discover(&config.data)
        .with_context(|| format!("Could not load event log '{}'", config.data.file))?;

    let series = OutcomeSeries::from_records(&log.records);
    let schedule = SwitchSchedule::from_config(&config.analysis, series.last_step());
    if schedule.is_empty() {
        tracing::warn!("No regime switches to analyze");
    }

    let analyzer = CrashRecoveryAnalyzer::with_config(CrashRecoveryConfig::from(&config.analysis))?;

    tracing::info!(
        "Analyzing {} switches over {} records",
        schedule.len(),
        series.len()
    );
    tracing::info!("Switch steps: {:?}", schedule.steps());

    let results = analyzer.analyze_all(&series, &schedule);

    Ok(AnalysisReport::new(
        Some(log.path.display().to_string()),
        series.len(),
        *analyzer.config(),
        results,
    ))
}

/// Runs the analyze command.
///
/// # Errors
/// Returns error if parameters are invalid, the event log cannot be loaded, or
/// the JSON output file cannot be written.
pub fn run_analyze(args: AnalyzeArgs, config: AppConfig) -> Result<()> {
    let format = OutputFormat::parse(&args.format)?;
    let report = build_report(&args, config)?;

    match format {
        OutputFormat::Text => print!("{}", ReportFormatter::format(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if let Some(output_path) = &args.output {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(output_path, json)
            .with_context(|| format!("Failed to write report to {}", output_path))?;
        tracing::info!("Report saved to {}", output_path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write as _;

    fn write_log(dir: &std::path::Path) -> String {
        let mut csv = String::from("Step,Reward\n");
        for step in 1..=400u64 {
            let reward = if (301..=340).contains(&step) { -0.5 } else { 1.0 };
            writeln!(csv, "{step},{reward}").unwrap();
        }
        let path = dir.join("game_analysis.csv");
        std::fs::write(&path, csv).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn output_format_parse_text() {
        assert_eq!(OutputFormat::parse("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::parse("TXT").unwrap(), OutputFormat::Text);
    }

    #[test]
    fn output_format_parse_json() {
        assert_eq!(OutputFormat::parse("json").unwrap(), OutputFormat::Json);
    }

    #[test]
    fn output_format_parse_invalid() {
        assert!(OutputFormat::parse("yaml").is_err());
    }

    #[test]
    fn overrides_replace_config_values() {
        let args = AnalyzeArgs {
            file: Some("other.csv".to_string()),
            switch_points: Some(vec![100, 200]),
            recovery_window: Some(10),
            threshold: Some(0.6),
            outcome_column: Some("Score".to_string()),
            ..AnalyzeArgs::default()
        };
        let mut config = AppConfig::default();
        config.analysis.switch_every = Some(300);

        args.apply_to(&mut config).unwrap();

        assert_eq!(config.data.file, "other.csv");
        assert_eq!(config.analysis.switch_points, vec![100, 200]);
        assert_eq!(config.analysis.switch_every, None);
        assert_eq!(config.analysis.recovery_window, 10);
        assert!((config.analysis.recovery_threshold - 0.6).abs() < f64::EPSILON);
        assert_eq!(config.data.outcome_column, "Score");
        assert_eq!(config.analysis.pre_window, 50);
    }

    #[test]
    fn invalid_override_is_rejected() {
        let args = AnalyzeArgs {
            threshold: Some(2.0),
            ..AnalyzeArgs::default()
        };

        assert!(args.apply_to(&mut AppConfig::default()).is_err());
    }

    #[test]
    fn build_report_analyzes_log_file() {
        let tmp = tempfile::tempdir().unwrap();
        let args = AnalyzeArgs {
            file: Some(write_log(tmp.path())),
            switch_points: Some(vec![300]),
            ..AnalyzeArgs::default()
        };

        let report = build_report(&args, AppConfig::default()).unwrap();

        assert_eq!(report.records, 400);
        assert_eq!(report.results.len(), 1);
        let result = &report.results[0];
        assert_eq!(result.pre_win_rate, Some(1.0));
        assert_eq!(result.post_win_rate, Some(0.2));
        assert_eq!(result.recovery_step, Some(331));
        assert_eq!(report.summary.recovered, 1);
    }

    #[test]
    fn build_report_uses_fixed_interval_over_log_extent() {
        let tmp = tempfile::tempdir().unwrap();
        let args = AnalyzeArgs {
            file: Some(write_log(tmp.path())),
            switch_every: Some(100),
            ..AnalyzeArgs::default()
        };

        let report = build_report(&args, AppConfig::default()).unwrap();

        let steps: Vec<u64> = report.results.iter().map(|r| r.switch_step).collect();
        assert_eq!(steps, vec![100, 200, 300, 400]);
        let last = report.results.last().unwrap();
        assert_eq!(last.post_win_rate, None);
        assert_eq!(last.recovery_step, None);
    }

    #[test]
    fn missing_log_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.csv");
        let args = AnalyzeArgs {
            file: Some(missing.to_string_lossy().into_owned()),
            ..AnalyzeArgs::default()
        };

        let err = build_report(&args, AppConfig::default()).unwrap_err();

        assert!(format!("{err:#}").contains("not found"));
    }

    #[test]
    fn run_analyze_writes_json_output() {
        let tmp = tempfile::tempdir().unwrap();
        let output = tmp.path().join("report.json");
        let args = AnalyzeArgs {
            file: Some(write_log(tmp.path())),
            format: "json".to_string(),
            output: Some(output.to_string_lossy().into_owned()),
            ..AnalyzeArgs::default()
        };

        run_analyze(args, AppConfig::default()).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(json["results"].as_array().unwrap().len(), 3);
        assert_eq!(json["summary"]["switches"], 3);
    }
}
