//! Configuration file support for Nutri.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/nutri/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub calories: CaloriesConfig,

    #[serde(default)]
    pub plan: PlanConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Calorie estimate configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaloriesConfig {
    /// Estimates below this are rejected as implausible
    #[serde(default = "default_floor_kcal")]
    pub floor_kcal: i64,
}

impl Default for CaloriesConfig {
    fn default() -> Self {
        Self {
            floor_kcal: default_floor_kcal(),
        }
    }
}

/// Workout plan defaults used when the caller doesn't supply them
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanConfig {
    #[serde(default = "default_minutes_per_session")]
    pub minutes_per_session: u32,

    #[serde(default = "default_preferred_time")]
    pub preferred_time: String,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            minutes_per_session: default_minutes_per_session(),
            preferred_time: default_preferred_time(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(std::env::temp_dir);
    base.join("nutri")
}

fn default_floor_kcal() -> i64 {
    800
}

fn default_minutes_per_session() -> u32 {
    30
}

fn default_preferred_time() -> String {
    "morning".into()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Reject values no estimate or plan could use
    pub fn validate(&self) -> Result<()> {
        if self.calories.floor_kcal < 0 {
            return Err(Error::Config(format!(
                "calories.floor_kcal must not be negative (got {})",
                self.calories.floor_kcal
            )));
        }
        if self.plan.minutes_per_session == 0 {
            return Err(Error::Config(
                "plan.minutes_per_session must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(std::env::temp_dir);
        base.join("nutri").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
