//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/tmap/tmap.toml`
//! 3. Environment variables: `TMAP_*` prefix (e.g. `TMAP_CANVAS__WIDTH`)
//!
//! CLI flags override whatever was loaded.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Target canvas the layout is computed for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: i32,
    pub height: i32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

/// Papers dataset settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PapersConfig {
    /// Default dataset file used when the CLI gets no explicit path
    pub dataset: Option<PathBuf>,
    /// Insert the publication year as the first category level
    pub by_year: bool,
}

impl Default for PapersConfig {
    fn default() -> Self {
        Self {
            dataset: None,
            by_year: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct TmapConfig {
    pub canvas: CanvasConfig,
    pub papers: PapersConfig,
}

impl TmapConfig {
    /// Load with the standard layering (defaults → global file → env).
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::global_config_path().as_deref())
    }

    /// Load with an explicit global-config location (tests).
    pub fn load_from(global_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder =
            Config::builder().add_source(Config::try_from(&TmapConfig::default())?);
        if let Some(path) = global_path {
            builder = builder.add_source(File::from(path).required(false));
        }
        builder = builder.add_source(
            Environment::with_prefix("TMAP")
                .separator("__")
                .try_parsing(true),
        );
        builder.build()?.try_deserialize()
    }

    /// Location of the global config file, if a home directory exists.
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "tmap").map(|dirs| dirs.config_dir().join("tmap.toml"))
    }

    /// Effective configuration rendered as TOML for display.
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TmapConfig::default();

        assert_eq!(config.canvas.width, 1024);
        assert_eq!(config.canvas.height, 768);
        assert!(config.papers.by_year);
        assert!(config.papers.dataset.is_none());
    }

    #[test]
    fn test_load_without_global_file_yields_defaults() {
        let config = TmapConfig::load_from(None).unwrap();
        assert_eq!(config, TmapConfig::default());
    }

    #[test]
    fn test_to_toml_round_trips() {
        let config = TmapConfig::default();
        let parsed: TmapConfig = toml::from_str(&config.to_toml()).unwrap();
        assert_eq!(parsed, config);
    }
}
