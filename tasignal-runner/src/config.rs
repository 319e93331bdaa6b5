//! Serializable analysis configuration.
//!
//! One TOML file drives both single-symbol and batch runs:
//!
//! ```toml
//! [data]
//! lookback_days = 90
//! source = "yahoo"        # yahoo | csv | synthetic
//! csv_dir = "data"
//!
//! [indicators]
//! rsi_period = 14
//!
//! [levels]
//! support_ordering = "descending"
//!
//! [batch]
//! max_parallel = 10
//! ```
//!
//! Every section and every key is optional; missing values take defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tasignal_core::engine::{EngineSettings, LevelSettings, RuleSettings, TargetSettings};
use tasignal_core::indicators::{IndicatorSettings, SettingsError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("invalid [indicators] section: {0}")]
    Indicators(#[from] SettingsError),
}

/// Which provider feeds the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    #[default]
    Yahoo,
    Csv,
    Synthetic,
}

impl std::str::FromStr for SourceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yahoo" => Ok(Self::Yahoo),
            "csv" => Ok(Self::Csv),
            "synthetic" => Ok(Self::Synthetic),
            other => Err(ConfigError::Invalid(format!(
                "unknown data source '{other}' (expected yahoo, csv or synthetic)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Calendar days of history ending at the analysis date.
    pub lookback_days: u32,
    pub source: SourceKind,
    /// Directory holding `{SYMBOL}.csv` files for the csv source.
    pub csv_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            lookback_days: 90,
            source: SourceKind::Yahoo,
            csv_dir: PathBuf::from("data"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Upper bound on symbols analyzed concurrently.
    pub max_parallel: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { max_parallel: 10 }
    }
}

/// Top-level configuration for an analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub data: DataConfig,
    pub indicators: IndicatorSettings,
    pub levels: LevelSettings,
    pub targets: TargetSettings,
    pub rules: RuleSettings,
    pub batch: BatchConfig,
}

impl AnalysisConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data.lookback_days < 2 {
            return Err(ConfigError::Invalid(format!(
                "data.lookback_days must be at least 2, got {}",
                self.data.lookback_days
            )));
        }
        if self.batch.max_parallel == 0 {
            return Err(ConfigError::Invalid(
                "batch.max_parallel must be positive".into(),
            ));
        }
        if self.levels.order == 0 || self.levels.window == 0 {
            return Err(ConfigError::Invalid(
                "levels.window and levels.order must be positive".into(),
            ));
        }
        if self.targets.range_window == 0 || self.rules.volume_window == 0 {
            return Err(ConfigError::Invalid(
                "targets.range_window and rules.volume_window must be positive".into(),
            ));
        }
        Ok(self.indicators.validate()?)
    }

    /// The slice of the config the signal engine reads.
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            levels: self.levels.clone(),
            targets: self.targets.clone(),
            rules: self.rules.clone(),
        }
    }
}
