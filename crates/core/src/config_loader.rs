use crate::config::AppConfig;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config/Config.toml";
pub const ENV_PREFIX: &str = "REGIME_";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration from the default TOML path, environment, and JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if a present configuration source cannot be parsed or
    /// the merged configuration is invalid.
    pub fn load() -> Result<AppConfig> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Loads configuration by layering built-in defaults, the TOML file at
    /// `path`, `REGIME_`-prefixed environment variables, and `config/Config.json`.
    ///
    /// Missing files are skipped. Nested keys use `__` in environment
    /// variables, e.g. `REGIME_ANALYSIS__RECOVERY_THRESHOLD=0.6`.
    ///
    /// # Errors
    ///
    /// Returns an error if a present configuration source cannot be parsed or
    /// the merged configuration is invalid.
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig> {
        let path = path.as_ref();
        let config: AppConfig = Self::figment(path)
            .extract()
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

        config.validate().context("Invalid configuration")?;

        tracing::debug!(?config, "Configuration loaded");
        Ok(config)
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .join(Json::file("config/Config.json"))
    }
}
