//! Application configuration management.
//!
//! This module handles the persistent preferences for abrepeat: the volume and
//! speed a session starts with, the fast-forward/rewind step, how many files
//! may be loaded at once, the tips banner and where the player writes its log.
//! Configuration is stored in the user's config directory (typically
//! ~/.config/abrepeat/config.toml). Session state such as marker slots is never
//! persisted.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_MAX_FILES, DEFAULT_STEP_SECONDS, MAX_FILES_LIMIT, SPEED_MAX, SPEED_MIN, VOLUME_MAX,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_volume")]
    pub default_volume: u8,
    #[serde(default = "default_speed")]
    pub default_speed: f32,
    #[serde(default = "default_step_seconds")]
    pub step_seconds: f32,
    #[serde(default = "default_max_files")]
    pub max_files: usize,
    #[serde(default = "default_show_tips")]
    pub show_tips: bool,
    #[serde(default = "default_tip_interval_secs")]
    pub tip_interval_secs: u64,
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

fn default_volume() -> u8 {
    VOLUME_MAX
}

fn default_speed() -> f32 {
    1.0
}

fn default_step_seconds() -> f32 {
    DEFAULT_STEP_SECONDS
}

fn default_max_files() -> usize {
    DEFAULT_MAX_FILES
}

fn default_show_tips() -> bool {
    true
}

fn default_tip_interval_secs() -> u64 {
    5
}

fn default_log_file() -> String {
    std::env::temp_dir()
        .join("abrepeat.log")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            default_volume: default_volume(),
            default_speed: default_speed(),
            step_seconds: default_step_seconds(),
            max_files: default_max_files(),
            show_tips: default_show_tips(),
            tip_interval_secs: default_tip_interval_secs(),
            log_file: default_log_file(),
        }
    }

    pub fn config_dir() -> Result<PathBuf, Box<dyn Error>> {
        // Check for XDG_CONFIG_HOME first (useful for testing)
        let config_dir = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config).join("abrepeat")
        } else {
            dirs::config_dir()
                .ok_or("Unable to find config directory")?
                .join("abrepeat")
        };
        Ok(config_dir)
    }

    pub fn config_path() -> Result<PathBuf, Box<dyn Error>> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn load() -> Result<Self, Box<dyn Error>> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Default::default());
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), Box<dyn Error>> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()?;
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(&config_path, toml_string)?;

        Ok(())
    }

    pub fn exists() -> Result<bool, Box<dyn Error>> {
        Ok(Self::config_path()?.exists())
    }

    /// Log file path with `~` and environment variables expanded
    pub fn log_path(&self) -> Result<PathBuf, Box<dyn Error>> {
        let expanded = shellexpand::full(&self.log_file)?;
        Ok(PathBuf::from(expanded.as_ref()))
    }

    /// Reject values a hand-edited file could carry but the player cannot use
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.default_volume > VOLUME_MAX {
            return Err(format!("default_volume must be 0-{VOLUME_MAX}").into());
        }
        if !(SPEED_MIN..=SPEED_MAX).contains(&self.default_speed) {
            return Err(format!("default_speed must be between {SPEED_MIN} and {SPEED_MAX}").into());
        }
        if !(self.step_seconds.is_finite() && self.step_seconds > 0.0) {
            return Err("step_seconds must be a positive number".into());
        }
        if !(1..=MAX_FILES_LIMIT).contains(&self.max_files) {
            return Err(format!("max_files must be 1-{MAX_FILES_LIMIT}").into());
        }
        if self.tip_interval_secs == 0 {
            return Err("tip_interval_secs must be at least 1".into());
        }
        Ok(())
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let mut updated = self.clone();
        match key {
            "default_volume" => {
                updated.default_volume = value
                    .parse::<u8>()
                    .map_err(|_| "Value must be a whole number 0-100")?;
            }
            "default_speed" => {
                updated.default_speed = value
                    .parse::<f32>()
                    .map_err(|_| "Value must be a number")?;
            }
            "step_seconds" => {
                updated.step_seconds = value
                    .parse::<f32>()
                    .map_err(|_| "Value must be a number")?;
            }
            "max_files" => {
                updated.max_files = value
                    .parse::<usize>()
                    .map_err(|_| "Value must be a whole number")?;
            }
            "show_tips" => {
                updated.show_tips = value
                    .parse::<bool>()
                    .map_err(|_| "Value must be 'true' or 'false'")?;
            }
            "tip_interval_secs" => {
                updated.tip_interval_secs = value
                    .parse::<u64>()
                    .map_err(|_| "Value must be a whole number of seconds")?;
            }
            "log_file" => updated.log_file = value.to_string(),
            _ => return Err(format!("Unknown configuration key: {key}").into()),
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}
