use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_PRE_WINDOW: u64 = 50;
pub const DEFAULT_POST_WINDOW: u64 = 50;
pub const DEFAULT_RECOVERY_WINDOW: usize = 20;
pub const DEFAULT_RECOVERY_THRESHOLD: f64 = 0.50;
pub const DEFAULT_LOG_FILE: &str = "game_analysis.csv";

/// Invalid analysis or data parameters.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be at least 1")]
    ZeroWindow { name: &'static str },

    #[error("recovery threshold must be a finite value in [0, 1], got {0}")]
    ThresholdOutOfRange(f64),

    #[error("switch interval must be at least 1")]
    ZeroSwitchInterval,

    #[error("{name} column name must not be empty")]
    EmptyColumn { name: &'static str },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub data: DataConfig,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns the first invalid parameter found in either section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analysis.validate()?;
        self.data.validate()
    }
}

/// Parameters for the crash/recovery analysis around each regime switch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Explicit switch steps. Ignored when `switch_every` is set.
    pub switch_points: Vec<u64>,
    /// Generate switches at every multiple of this interval up to the last step.
    pub switch_every: Option<u64>,
    /// Step span of the window ending at the switch (inclusive).
    pub pre_window: u64,
    /// Step span of the window starting just after the switch.
    pub post_window: u64,
    /// Record count of each recovery-scan window.
    pub recovery_window: usize,
    pub recovery_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            switch_points: vec![300, 600, 900],
            switch_every: None,
            pre_window: DEFAULT_PRE_WINDOW,
            post_window: DEFAULT_POST_WINDOW,
            recovery_window: DEFAULT_RECOVERY_WINDOW,
            recovery_threshold: DEFAULT_RECOVERY_THRESHOLD,
        }
    }
}

impl AnalysisConfig {
    /// # Errors
    ///
    /// Returns an error for zero-sized windows, a zero switch interval, or a
    /// threshold outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pre_window == 0 {
            return Err(ConfigError::ZeroWindow { name: "pre_window" });
        }
        if self.post_window == 0 {
            return Err(ConfigError::ZeroWindow { name: "post_window" });
        }
        if self.recovery_window == 0 {
            return Err(ConfigError::ZeroWindow {
                name: "recovery_window",
            });
        }
        if !self.recovery_threshold.is_finite() || !(0.0..=1.0).contains(&self.recovery_threshold)
        {
            return Err(ConfigError::ThresholdOutOfRange(self.recovery_threshold));
        }
        if self.switch_every == Some(0) {
            return Err(ConfigError::ZeroSwitchInterval);
        }
        Ok(())
    }
}

/// Where the event log lives and how its columns are named.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Log file name. The default name is only looked up in `search_dirs`;
    /// any other name is tried as given before the search directories.
    pub file: String,
    /// Directories tried in order.
    pub search_dirs: Vec<String>,
    pub step_column: String,
    pub outcome_column: String,
    /// Rolling win-rate window; chosen from the log length when unset.
    pub rolling_window: Option<usize>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            file: DEFAULT_LOG_FILE.to_string(),
            search_dirs: vec![
                "results".to_string(),
                "../results".to_string(),
                ".".to_string(),
            ],
            step_column: "Step".to_string(),
            outcome_column: "Reward".to_string(),
            rolling_window: None,
        }
    }
}

impl DataConfig {
    #[must_use]
    pub fn uses_default_file(&self) -> bool {
        self.file == DEFAULT_LOG_FILE
    }

    /// # Errors
    ///
    /// Returns an error for empty column names or a zero rolling window.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step_column.trim().is_empty() {
            return Err(ConfigError::EmptyColumn { name: "step" });
        }
        if self.outcome_column.trim().is_empty() {
            return Err(ConfigError::EmptyColumn { name: "outcome" });
        }
        if self.rolling_window == Some(0) {
            return Err(ConfigError::ZeroWindow {
                name: "rolling_window",
            });
        }
        Ok(())
    }
}
