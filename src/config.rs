//! Run configuration
//!
//! Handles loading a run from a TOML file and environment variables. CLI flags
//! are layered on top by the binary.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::models::{RiskAppetite, ScenarioParameters};

/// Seed used when none is configured, so default runs are repeatable
pub const DEFAULT_SEED: u64 = 42;

/// Default number of histogram buckets in the console report
pub const DEFAULT_HISTOGRAM_BINS: usize = 40;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid risk appetite: {0}. Must be one of: low, medium, high")]
    InvalidRiskAppetite(String),

    #[error("invalid sample count: must be at least 1")]
    InvalidSampleCount,

    #[error("invalid histogram bin count: must be at least 1")]
    InvalidHistogramBins,

    #[error("environment variable {name}: {message}")]
    Env { name: &'static str, message: String },
}

impl FromStr for RiskAppetite {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(RiskAppetite::Low),
            "medium" => Ok(RiskAppetite::Medium),
            "high" => Ok(RiskAppetite::High),
            _ => Err(ConfigError::InvalidRiskAppetite(s.to_string())),
        }
    }
}

pub(crate) fn deserialize_risk_appetite<'de, D>(deserializer: D) -> Result<RiskAppetite, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    RiskAppetite::from_str(&s).map_err(serde::de::Error::custom)
}

/// Simulator configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Historical dataset (CSV)
    pub dataset: PathBuf,
    /// RNG seed; `None` draws a fresh seed from OS entropy
    pub seed: Option<u64>,
    /// Buckets in the console histogram
    pub histogram_bins: usize,
    /// Overrides the last dataset row as the verdict benchmark
    pub latest_profit: Option<f64>,
    pub scenario: ScenarioParameters,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("data/business_data.csv"),
            seed: Some(DEFAULT_SEED),
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            latest_profit: None,
            scenario: ScenarioParameters::default(),
        }
    }
}

impl SimulatorConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: SimulatorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `DECISION_SIM_*` environment overrides
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    fn apply_vars<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = var("DECISION_SIM_DATASET") {
            self.dataset = PathBuf::from(path);
        }

        if let Some(seed) = var("DECISION_SIM_SEED") {
            self.seed = Some(seed.parse().map_err(|e| ConfigError::Env {
                name: "DECISION_SIM_SEED",
                message: format!("{}", e),
            })?);
        }

        if let Some(samples) = var("DECISION_SIM_SAMPLES") {
            self.scenario.sample_count = samples.parse().map_err(|e| ConfigError::Env {
                name: "DECISION_SIM_SAMPLES",
                message: format!("{}", e),
            })?;
        }

        if let Some(appetite) = var("DECISION_SIM_RISK_APPETITE") {
            self.scenario.risk_appetite = RiskAppetite::from_str(&appetite)?;
        }

        self.validate()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scenario.sample_count == 0 {
            return Err(ConfigError::InvalidSampleCount);
        }
        if self.histogram_bins == 0 {
            return Err(ConfigError::InvalidHistogramBins);
        }
        Ok(())
    }
}
