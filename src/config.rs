//! User configuration.
//!
//! Layout defaults shared by every cheat sheet live in a TOML file with
//! platform-specific directory resolution. Documents and CLI flags override
//! these values.

use crate::constants::CONFIG_DIR_NAME;
use crate::models::LayoutOverrides;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// User configuration.
///
/// # File Location
///
/// - Linux: `~/.config/cheatsheet/config.toml`
/// - macOS: `~/Library/Application Support/cheatsheet/config.toml`
/// - Windows: `%APPDATA%\cheatsheet\config.toml`
///
/// # Example
///
/// ```toml
/// [layout]
/// paper_size = "a4"
/// columns = 4
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Layout defaults applied before the document's own `config:` mapping
    #[serde(default)]
    pub layout: LayoutOverrides,
}

impl Config {
    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            debug!(path = %config_path.display(), "no user config, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        config.validate().context(format!(
            "Invalid layout settings in config file: {}",
            path.display()
        ))?;

        debug!(path = %path.display(), "loaded user config");
        Ok(config)
    }

    /// Validates the layout defaults on their own, over the built-in defaults.
    pub fn validate(&self) -> Result<()> {
        self.layout
            .apply(crate::models::default_layout_config())
            .validate()
    }
}
