//! Configuration loading and defaults.
//!
//! The config file lives in the platform config directory and is created with
//! defaults on first run. Share credentials can be supplied through the
//! environment instead of the file.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment override for the share account name.
pub const SHARE_USER_ENV: &str = "DESKVAULT_SHARE_USER";
/// Environment override for the share password.
pub const SHARE_PASSWORD_ENV: &str = "DESKVAULT_SHARE_PASSWORD";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub share: ShareConfig,
    #[serde(default)]
    pub backup: BackupConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// UNC path or mounted directory that receives all backups.
    pub root: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupConfig {
    /// Directory holding one profile folder per account.
    pub profiles_dir: PathBuf,
    /// Concurrent file copies per directory level.
    pub file_workers: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        let root = if cfg!(windows) {
            PathBuf::from(r"\\backup-server\backups")
        } else {
            PathBuf::from("/mnt/backups")
        };

        Self {
            root,
            username: None,
            password: None,
        }
    }
}

impl Default for BackupConfig {
    fn default() -> Self {
        let profiles_dir = if cfg!(windows) {
            PathBuf::from(r"C:\Users")
        } else {
            PathBuf::from("/home")
        };

        Self {
            profiles_dir,
            file_workers: 4,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ShareConfig {
    /// Share account name; the environment wins over the config file so
    /// credentials never have to be written to disk.
    pub fn username(&self) -> Option<String> {
        env::var(SHARE_USER_ENV)
            .ok()
            .or_else(|| self.username.clone())
    }

    /// Share password, same precedence as [`ShareConfig::username`].
    pub fn password(&self) -> Option<String> {
        env::var(SHARE_PASSWORD_ENV)
            .ok()
            .or_else(|| self.password.clone())
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("", "", "deskvault").ok_or_else(|| {
            Error::Config("could not determine config directory".to_string())
        })?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }
}
