// src/config.rs
//
// Intake configuration.
//
// Resolution order: built-in defaults, then `<config_dir>/myhdf5/intake.json`
// when present, then environment overrides. Values are fixed once the intake
// service is built.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::SizeThreshold;
use crate::error::{AppError, AppResult};
use crate::infrastructure::DEFAULT_MARKER_NAME;

pub const ENV_SIZE_THRESHOLD: &str = "MYHDF5_SIZE_THRESHOLD";
pub const ENV_DEBOUNCE_MS: &str = "MYHDF5_DEBOUNCE_MS";

const APP_DIR_NAME: &str = "myhdf5";
const CONFIG_FILE_NAME: &str = "intake.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Largest file read directly into memory, in bytes (inclusive).
    pub size_threshold_bytes: u64,

    /// How long the load guard stays closed after a load terminates.
    pub debounce_ms: u64,

    /// Temp marker used to hand a launch path to the window.
    pub marker_file_name: String,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            size_threshold_bytes: SizeThreshold::ONE_GIB.bytes(),
            debounce_ms: 500,
            marker_file_name: DEFAULT_MARKER_NAME.to_string(),
        }
    }
}

impl IntakeConfig {
    /// Defaults, user config file, then environment.
    pub fn load() -> AppResult<Self> {
        let mut config = match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// `<config_dir>/myhdf5/intake.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_SIZE_THRESHOLD) {
            self.size_threshold_bytes = value.trim().parse()?;
        }
        if let Some(value) = lookup(ENV_DEBOUNCE_MS) {
            self.debounce_ms = value.trim().parse()?;
        }
        Ok(())
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.size_threshold_bytes == 0 {
            return Err(AppError::Config(
                "size_threshold_bytes must be greater than zero".to_string(),
            ));
        }
        if self.debounce_ms > 5_000 {
            return Err(AppError::Config(format!(
                "debounce_ms must be at most 5000, got {}",
                self.debounce_ms
            )));
        }
        if self.marker_file_name.trim().is_empty() {
            return Err(AppError::Config(
                "marker_file_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn threshold(&self) -> SizeThreshold {
        SizeThreshold::new(self.size_threshold_bytes)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
