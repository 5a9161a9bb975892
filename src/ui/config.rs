//! # Configuration
//!
//! Reads user configuration from `~/.config/drinkdeck/config.json`.
//!
//! ## Overview
//!
//! The [`Config`] struct is deserialized from a JSON file in the user's XDG
//! config directory (or the path given with `--config`). Every field has a
//! default, so a missing file or an empty object is a valid configuration.
//! The screen never writes this file.
//!
//! ```json
//! {
//!   "theme": "Siren",
//!   "card_width_ratio": 0.7,
//!   "frame_rate": 60,
//!   "animations": true
//! }
//! ```
//!
//! The `directories` crate is used to resolve the platform-appropriate config
//! directory.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// User configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The name of the selected theme (must match a built-in theme name).
    #[serde(default = "default_theme_name")]
    pub theme: String,

    /// Card width as a fraction of the screen width.
    #[serde(default = "default_card_width_ratio")]
    pub card_width_ratio: f64,

    /// Scroll and animation ticks per second.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,

    /// Play the entrance animations on startup.
    #[serde(default = "default_animations")]
    pub animations: bool,
}

fn default_theme_name() -> String {
    "Siren".to_string()
}

fn default_card_width_ratio() -> f64 {
    0.7
}

fn default_frame_rate() -> u32 {
    60
}

fn default_animations() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
            card_width_ratio: default_card_width_ratio(),
            frame_rate: default_frame_rate(),
            animations: default_animations(),
        }
    }
}

impl Config {
    /// Load configuration from the default location. Returns
    /// `Config::default()` if the file does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path. Returns `Config::default()` if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if !(self.card_width_ratio > 0.0 && self.card_width_ratio <= 1.0) {
            bail!(
                "card_width_ratio must be in (0, 1], got {}",
                self.card_width_ratio
            );
        }
        if !(1..=240).contains(&self.frame_rate) {
            bail!("frame_rate must be in 1..=240, got {}", self.frame_rate);
        }
        Ok(())
    }

    /// Time between ticks at the configured frame rate.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frame_rate.max(1)))
    }

    /// Return the path to the config file.
    fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "drinkdeck")
            .context("Could not determine config directory")?;
        Ok(dirs.config_dir().join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, "Siren");
        assert_eq!(config.card_width_ratio, 0.7);
        assert_eq!(config.frame_rate, 60);
        assert!(config.animations);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_empty_object_uses_defaults() {
        let config: Config = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_deserialize_partial() {
        let json = r#"{"theme": "Reserve", "animations": false}"#;
        let config: Config = serde_json::from_str(json).expect("deserialize");
        assert_eq!(config.theme, "Reserve");
        assert!(!config.animations);
        assert_eq!(config.frame_rate, 60);
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config_path = temp_dir.path().join("config.json");
        fs::write(&config_path, r#"{"card_width_ratio": 0.5, "frame_rate": 30}"#)
            .expect("write");

        let loaded = Config::load_from(&config_path).expect("load_from");
        assert_eq!(loaded.card_width_ratio, 0.5);
        assert_eq!(loaded.frame_interval(), Duration::from_secs_f64(1.0 / 30.0));
    }

    #[test]
    fn test_load_from_missing_file_returns_default() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config_path = temp_dir.path().join("does_not_exist.json");

        let loaded = Config::load_from(&config_path).expect("load_from");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_load_from_rejects_bad_ratio() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config_path = temp_dir.path().join("config.json");
        fs::write(&config_path, r#"{"card_width_ratio": 1.5}"#).expect("write");

        let err = Config::load_from(&config_path).expect_err("ratio out of range");
        assert!(format!("{err:#}").contains("card_width_ratio"));
    }

    #[test]
    fn test_validate_frame_rate_bounds() {
        let mut config = Config {
            frame_rate: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
        config.frame_rate = 241;
        assert!(config.validate().is_err());
        config.frame_rate = 240;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deny_unknown_fields() {
        let json = r#"{"theme": "Siren", "unknown_field": true}"#;
        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err(), "should reject unknown fields");
    }
}
