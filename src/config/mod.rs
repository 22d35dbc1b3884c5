use crate::global;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub meeting: MeetingConfig,
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MeetingConfig {
    /// Meeting length (in minutes) used when `add` is not given one.
    pub default_length_minutes: u64,
}

impl Default for MeetingConfig {
    fn default() -> Self {
        Self {
            default_length_minutes: 15,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Ring the terminal bell when a speaker's time runs out.
    pub chime: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self { chime: true }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;

        info!("Loaded config from {:?}", config_path);
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        global::config_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.meeting.default_length_minutes, 15);
        assert!(config.behavior.chime);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("[behavior]\nchime = false\n").unwrap();
        assert!(!config.behavior.chime);
        assert_eq!(config.meeting.default_length_minutes, 15);
    }
}
