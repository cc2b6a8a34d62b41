//! Runtime configuration
//!
//! Values come from an optional YAML settings file (path in
//! `TTNOTIFIER_CONFIG`), then environment variables, which win.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Optional YAML settings file
//! - 1.0.0: Environment-based configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::features::notifications::NotifierKind;
use crate::features::reminders::{DEFAULT_CHECK_INTERVAL, DEFAULT_LEAD_MINUTES};

/// Environment variable naming the YAML settings file
pub const CONFIG_PATH_VAR: &str = "TTNOTIFIER_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding timetable documents
    pub data_dir: PathBuf,
    pub log_level: String,
    /// Seconds between reminder checks
    pub check_interval_secs: u64,
    /// Minutes before class start at which reminders fire
    pub lead_minutes: i64,
    pub notifier: NotifierKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("ttnotifier_data"),
            log_level: "info".to_string(),
            check_interval_secs: DEFAULT_CHECK_INTERVAL.as_secs(),
            lead_minutes: DEFAULT_LEAD_MINUTES,
            notifier: NotifierKind::default(),
        }
    }
}

impl Config {
    /// Build configuration from the process environment
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::load(path.trim())?,
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load settings from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from `lookup` (normally the environment)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = get("TTNOTIFIER_DATA_DIR") {
            self.data_dir = PathBuf::from(dir.trim());
        }
        if let Some(level) = get("LOG_LEVEL") {
            self.log_level = level.trim().to_string();
        }
        if let Some(secs) = get("REMINDER_CHECK_INTERVAL_SECS") {
            self.check_interval_secs = secs
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid REMINDER_CHECK_INTERVAL_SECS '{secs}': {e}"))?;
        }
        if let Some(minutes) = get("REMINDER_LEAD_MINUTES") {
            self.lead_minutes = minutes
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid REMINDER_LEAD_MINUTES '{minutes}': {e}"))?;
        }
        if let Some(kind) = get("TTNOTIFIER_NOTIFIER") {
            self.notifier = kind.parse()?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        // Reminders match a single wall-clock minute, so every minute needs a check
        if !(1..=60).contains(&self.check_interval_secs) {
            return Err(anyhow::anyhow!(
                "Check interval must be between 1 and 60 seconds, got {}",
                self.check_interval_secs
            ));
        }
        // A lead time must land on the same day as the class
        if !(1..24 * 60).contains(&self.lead_minutes) {
            return Err(anyhow::anyhow!(
                "Lead minutes must be between 1 and 1439, got {}",
                self.lead_minutes
            ));
        }
        if self.data_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("Data directory must not be empty"));
        }
        Ok(())
    }

    pub fn check_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.check_interval_secs)
    }
}
