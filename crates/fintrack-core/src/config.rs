//! Configuration for fintrack
//!
//! Config is loaded with a two-layer resolution:
//! 1. Embedded defaults (compiled into binary from `config/fintrack.toml`)
//! 2. Optional override at `<data_dir>/config.toml`, merged key-by-key on top
//!
//! The data directory itself resolves as: explicit path (CLI flag) >
//! `FINTRACK_DATA_DIR` env var > platform data dir (`~/.local/share/fintrack`).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/fintrack.toml");

/// Name of the override file inside the data directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable that overrides the default data directory
pub const DATA_DIR_ENV: &str = "FINTRACK_DATA_DIR";

/// Upper bound for forecast horizons and sample history spans
pub const MAX_MONTHS: u32 = 120;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub display: DisplayConfig,
    pub forecast: ForecastConfig,
    pub budget: BudgetConfig,
    pub predictor: PredictorConfig,
    pub sample: SampleConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub currency_symbol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    pub months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetConfig {
    pub near_limit_percent: f64,
}

/// Training parameters for the expense predictor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictorConfig {
    pub min_samples: usize,
    pub estimators: usize,
    pub seed: u64,
    pub test_fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleConfig {
    pub months: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: DisplayConfig {
                currency_symbol: "₹".to_string(),
            },
            forecast: ForecastConfig { months: 3 },
            budget: BudgetConfig {
                near_limit_percent: 80.0,
            },
            predictor: PredictorConfig::default(),
            sample: SampleConfig { months: 3 },
        }
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            min_samples: 20,
            estimators: 100,
            seed: 42,
            test_fraction: 0.2,
        }
    }
}

impl Config {
    /// Load the embedded defaults merged with `<data_dir>/config.toml`, if present
    pub fn load(data_dir: &Path) -> Result<Self> {
        let override_path = data_dir.join(CONFIG_FILE_NAME);
        let override_content = if override_path.exists() {
            debug!("Loading config override from {}", override_path.display());
            Some(fs::read_to_string(&override_path)?)
        } else {
            None
        };
        Self::from_layers(override_content.as_deref())
    }

    /// Merge an optional override document onto the embedded defaults
    pub fn from_layers(override_content: Option<&str>) -> Result<Self> {
        let mut base: toml::Value = toml::from_str(DEFAULT_CONFIG)?;
        if let Some(content) = override_content {
            let overlay: toml::Value = toml::from_str(content)?;
            merge_values(&mut base, overlay);
        }
        let config: Config = base.try_into()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let near_limit = self.budget.near_limit_percent;
        if !(near_limit.is_finite() && (0.0..=100.0).contains(&near_limit)) {
            return Err(Error::InvalidData(format!(
                "budget.near_limit_percent must be between 0 and 100, got {}",
                near_limit
            )));
        }
        for (key, months) in [
            ("forecast.months", self.forecast.months),
            ("sample.months", self.sample.months),
        ] {
            if !(1..=MAX_MONTHS).contains(&months) {
                return Err(Error::InvalidData(format!(
                    "{} must be between 1 and {}, got {}",
                    key, MAX_MONTHS, months
                )));
            }
        }

        let p = &self.predictor;
        if !(p.test_fraction > 0.0 && p.test_fraction < 1.0) {
            return Err(Error::InvalidData(format!(
                "predictor.test_fraction must be between 0 and 1, got {}",
                p.test_fraction
            )));
        }
        if p.estimators == 0 {
            return Err(Error::InvalidData(
                "predictor.estimators must be at least 1".into(),
            ));
        }
        if p.min_samples < 2 {
            return Err(Error::InvalidData(
                "predictor.min_samples must be at least 2".into(),
            ));
        }
        Ok(())
    }
}

/// Recursively overlay `overlay` onto `base`; tables merge, everything else replaces
fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Platform default data directory (`~/.local/share/fintrack` on Linux)
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("fintrack"))
}

/// Resolve the data directory: explicit path > env var > platform dir > `./data`
pub fn resolve_data_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    default_data_dir().unwrap_or_else(|| PathBuf::from("data"))
}
