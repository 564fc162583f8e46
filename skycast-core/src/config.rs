use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::model::Units;

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeatherMap API key used when the submission carries none.
    pub api_key: Option<String>,

    /// Country code assumed for ZIP lookups without an explicit country.
    pub default_country: Option<String>,

    /// Preferred display units.
    pub units: Option<Units>,
}

impl Config {
    /// Country used when a ZIP submission carries none.
    pub fn default_country(&self) -> &str {
        self.default_country.as_deref().unwrap_or("US")
    }

    pub fn units(&self) -> Units {
        self.units.unwrap_or_default()
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_falls_back_to_defaults() {
        let cfg = Config::default();

        assert_eq!(cfg.api_key, None);
        assert_eq!(cfg.default_country(), "US");
        assert_eq!(cfg.units(), Units::Metric);
    }

    #[test]
    fn configured_values_take_precedence() {
        let cfg = Config {
            api_key: Some("KEY".to_string()),
            default_country: Some("CA".to_string()),
            units: Some(Units::Imperial),
        };

        assert_eq!(cfg.api_key.as_deref(), Some("KEY"));
        assert_eq!(cfg.default_country(), "CA");
        assert_eq!(cfg.units(), Units::Imperial);
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let cfg = Config {
            api_key: Some("KEY".to_string()),
            default_country: Some("CA".to_string()),
            units: Some(Units::Standard),
        };

        let text = toml::to_string_pretty(&cfg).expect("must serialize");
        let parsed: Config = toml::from_str(&text).expect("must parse");

        assert_eq!(parsed.api_key.as_deref(), Some("KEY"));
        assert_eq!(parsed.default_country(), "CA");
        assert_eq!(parsed.units(), Units::Standard);
    }
}
