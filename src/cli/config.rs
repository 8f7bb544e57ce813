//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::Username;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default database file
    pub database: Option<PathBuf>,

    /// User to act as when neither `--user` nor `NOTESHARE_USER` is given
    pub user: Option<Username>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/noteshare/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("noteshare")
            .join("config.toml")
    }

    /// Resolve the database path, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--db` argument
    /// 2. Config file `database` setting
    /// 3. `notes.db` in the platform data directory
    pub fn database_path(&self, cli_db: Option<&PathBuf>) -> PathBuf {
        cli_db
            .cloned()
            .or_else(|| self.database.clone())
            .unwrap_or_else(Self::default_database_path)
    }

    fn default_database_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("noteshare")
            .join("notes.db")
    }
}
