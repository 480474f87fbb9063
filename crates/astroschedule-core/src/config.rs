//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Override rule for conflicting tasks
//! - Whether task descriptions must be unique
//! - Whether overrides need interactive confirmation
//! - Log level and optional log file
//!
//! Configuration is stored at `~/.config/astroschedule/config.toml`.
//! Only the configuration is persisted; the schedule itself lives in memory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::conflict::OverridePolicy;
use crate::error::ConfigError;

/// Schedule behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default)]
    pub override_policy: OverridePolicy,
    #[serde(default)]
    pub enforce_unique_descriptions: bool,
    /// Ask before replacing conflicting tasks. When false, overrides are
    /// applied without a prompt.
    #[serde(default = "default_true")]
    pub confirm_overrides: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive, e.g. "warn" or "astroschedule_core=debug".
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Append log lines to this file instead of stderr.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/astroschedule/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub log: LogConfig,
}

fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "warn".into()
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            override_policy: OverridePolicy::default(),
            enforce_unique_descriptions: false,
            confirm_overrides: true,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Returns `~/.config/astroschedule[-dev]/` based on ASTROSCHEDULE_ENV.
///
/// Set ASTROSCHEDULE_ENV=dev to use the development config directory.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("ASTROSCHEDULE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("astroschedule-dev")
    } else {
        base_dir.join("astroschedule")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir(e.to_string()))?;
    Ok(dir)
}

impl Config {
    /// Default location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from the default location, falling back to defaults when the
    /// file is missing.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }
}
