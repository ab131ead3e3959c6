use anyhow::Result;
use eframe::egui::Color32;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::render::page_cache::DEFAULT_CAPACITY;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "pdeck";

/// User preferences. Read-only: pdeck never writes this file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeName>,

    /// Open the audience window fullscreen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullscreen: Option<bool>,

    /// How many rendered pages to keep.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_pages: Option<usize>,

    /// Fill for the blanked audience screen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blank: Option<BlankFill>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlankFill {
    #[default]
    Black,
    White,
}

impl BlankFill {
    pub fn color(&self) -> Color32 {
        match self {
            Self::Black => Color32::BLACK,
            Self::White => Color32::WHITE,
        }
    }
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found at {}", path.display())
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load the user config, falling back to defaults. A config that exists
    /// but does not parse is logged, never fatal.
    pub fn load_or_default() -> Self {
        match Self::path() {
            Ok(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), "ignoring config: {e:#}");
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// The config with every default spelled out, for `pdeck config show`.
    pub fn effective(&self) -> Self {
        Self {
            defaults: Some(DefaultsConfig {
                theme: Some(self.theme()),
                fullscreen: Some(self.fullscreen()),
                cache_pages: Some(self.cache_pages()),
                blank: Some(self.blank()),
            }),
        }
    }

    pub fn theme(&self) -> ThemeName {
        self.defaults
            .as_ref()
            .and_then(|d| d.theme)
            .unwrap_or_default()
    }

    pub fn fullscreen(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|d| d.fullscreen)
            .unwrap_or(false)
    }

    pub fn cache_pages(&self) -> usize {
        self.defaults
            .as_ref()
            .and_then(|d| d.cache_pages)
            .unwrap_or(DEFAULT_CAPACITY)
            .max(1)
    }

    pub fn blank(&self) -> BlankFill {
        self.defaults
            .as_ref()
            .and_then(|d| d.blank)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), contents).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.theme(), ThemeName::Dark);
        assert!(!config.fullscreen());
        assert_eq!(config.cache_pages(), DEFAULT_CAPACITY);
        assert_eq!(config.blank(), BlankFill::Black);
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            "defaults:\n  theme: light\n  fullscreen: true\n  cache_pages: 4\n  blank: white\n",
        );
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.theme(), ThemeName::Light);
        assert!(config.fullscreen());
        assert_eq!(config.cache_pages(), 4);
        assert_eq!(config.blank().color(), Color32::WHITE);
    }

    #[test]
    fn test_partial_config() {
        let file = write_config("defaults:\n  blank: white\n");
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.theme(), ThemeName::Dark);
        assert_eq!(config.blank(), BlankFill::White);
    }

    #[test]
    fn test_zero_cache_pages_clamped() {
        let file = write_config("defaults:\n  cache_pages: 0\n");
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.cache_pages(), 1);
    }

    #[test]
    fn test_invalid_value_rejected() {
        let file = write_config("defaults:\n  blank: purple\n");
        assert!(Config::load_from(file.path()).is_err());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("config.yaml")).unwrap_err();
        assert!(err.to_string().contains("No config found"));
    }

    #[test]
    fn test_effective_spells_out_defaults() {
        let yaml = Config::default().effective().to_yaml().unwrap();
        assert!(yaml.contains("theme: dark"));
        assert!(yaml.contains("fullscreen: false"));
        assert!(yaml.contains("cache_pages: 16"));
        assert!(yaml.contains("blank: black"));
    }
}
