use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::engine::Timings;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "pitchdeck";

/// Upper bound for any configured delay.
const MAX_TIMING_MS: u64 = 60_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timings: Option<TimingsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windowed: Option<bool>,

    /// 1-indexed slide to open on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_slide: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_hint: Option<bool>,
}

/// Millisecond overrides for the engine timings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimingsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settle_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_hide_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrance_ms: Option<u64>,
}

pub const KEYS: &[&str] = &[
    "defaults.windowed",
    "defaults.start_slide",
    "defaults.show_hint",
    "timings.exit_ms",
    "timings.settle_ms",
    "timings.idle_hide_ms",
    "timings.entrance_ms",
];

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `pitchdeck config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("Using default config: {e:#}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# pitchdeck configuration\n{yaml}");
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.windowed" => {
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .windowed = Some(parse_bool(key, value)?);
            }
            "defaults.start_slide" => {
                let slide = value
                    .parse::<usize>()
                    .ok()
                    .filter(|&n| n >= 1)
                    .ok_or_else(|| {
                        anyhow::anyhow!("Invalid start_slide: {value}. Must be a slide number (1 or higher).")
                    })?;
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .start_slide = Some(slide);
            }
            "defaults.show_hint" => {
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .show_hint = Some(parse_bool(key, value)?);
            }
            "timings.exit_ms" => {
                self.timings_mut().exit_ms = Some(parse_millis(key, value)?);
            }
            "timings.settle_ms" => {
                self.timings_mut().settle_ms = Some(parse_millis(key, value)?);
            }
            "timings.idle_hide_ms" => {
                self.timings_mut().idle_hide_ms = Some(parse_millis(key, value)?);
            }
            "timings.entrance_ms" => {
                self.timings_mut().entrance_ms = Some(parse_millis(key, value)?);
            }
            _ => anyhow::bail!("Unknown config key: {key}. Valid keys: {}", KEYS.join(", ")),
        }
        Ok(())
    }

    fn timings_mut(&mut self) -> &mut TimingsConfig {
        self.timings.get_or_insert_with(TimingsConfig::default)
    }

    pub fn windowed(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|d| d.windowed)
            .unwrap_or(false)
    }

    pub fn start_slide(&self) -> Option<usize> {
        self.defaults.as_ref().and_then(|d| d.start_slide)
    }

    pub fn show_hint(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|d| d.show_hint)
            .unwrap_or(true)
    }

    /// Engine timings with any configured overrides applied.
    pub fn timings(&self) -> Timings {
        let mut timings = Timings::default();
        let Some(t) = &self.timings else {
            return timings;
        };
        if let Some(ms) = t.exit_ms {
            timings.exit = Duration::from_millis(ms);
        }
        if let Some(ms) = t.settle_ms {
            timings.settle = Duration::from_millis(ms);
        }
        if let Some(ms) = t.idle_hide_ms {
            timings.idle_hide = Duration::from_millis(ms);
        }
        if let Some(ms) = t.entrance_ms {
            timings.entrance = Duration::from_millis(ms);
        }
        timings
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "true" | "yes" | "on" => Ok(true),
        "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("Invalid value for {key}: {value}. Must be 'true' or 'false'."),
    }
}

fn parse_millis(key: &str, value: &str) -> Result<u64> {
    match value.parse::<u64>() {
        Ok(ms) if ms <= MAX_TIMING_MS => Ok(ms),
        _ => anyhow::bail!(
            "Invalid value for {key}: {value}. Must be milliseconds between 0 and {MAX_TIMING_MS}."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_defaults() {
        let mut config = Config::default();
        config.set("defaults.windowed", "true").unwrap();
        config.set("defaults.start_slide", "3").unwrap();
        config.set("defaults.show_hint", "off").unwrap();
        assert!(config.windowed());
        assert_eq!(config.start_slide(), Some(3));
        assert!(!config.show_hint());
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("defaults.windowed", "maybe").is_err());
        assert!(config.set("defaults.start_slide", "0").is_err());
        assert!(config.set("defaults.start_slide", "first").is_err());
        assert!(config.set("timings.exit_ms", "-5").is_err());
        assert!(config.set("timings.exit_ms", "999999").is_err());
        assert!(config.defaults.is_none());
        assert!(config.timings.is_none());
    }

    #[test]
    fn test_set_unknown_key() {
        let mut config = Config::default();
        let err = config.set("defaults.theme", "dark").unwrap_err();
        assert!(err.to_string().contains("Unknown config key"));
    }

    #[test]
    fn test_timings_overrides_apply() {
        let mut config = Config::default();
        config.set("timings.exit_ms", "400").unwrap();
        config.set("timings.idle_hide_ms", "5000").unwrap();
        let timings = config.timings();
        assert_eq!(timings.exit, Duration::from_millis(400));
        assert_eq!(timings.idle_hide, Duration::from_millis(5000));
        assert_eq!(timings.settle, Timings::default().settle);
        assert_eq!(timings.entrance, Timings::default().entrance);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.windowed());
        assert!(config.show_hint());
        assert_eq!(config.start_slide(), None);
        assert_eq!(config.timings(), Timings::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = std::env::temp_dir()
            .join(format!("pitchdeck-config-test-{}", std::process::id()))
            .join(FILENAME);
        let mut config = Config::default();
        config.set("defaults.start_slide", "2").unwrap();
        config.set("timings.settle_ms", "80").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.start_slide(), Some(2));
        assert_eq!(loaded.timings().settle, Duration::from_millis(80));

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("pitchdeck-does-not-exist.yaml");
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("No config found"));
    }
}
