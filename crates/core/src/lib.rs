pub mod config;
pub mod config_loader;
pub mod events;

pub use config::{AnalysisConfig, AppConfig, ConfigError, DataConfig};
pub use config_loader::ConfigLoader;
pub use events::{EventRecord, OutcomePoint, RollingPoint};
