//! User configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment override for the remote service URL.
pub const REMOTE_URL_ENV: &str = "TASK_REMINDER_REMOTE_URL";

/// App data directory (`~/.task-reminder`), created on first use.
pub fn app_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let dir = home.join(".task-reminder");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Default location of the backing task document.
pub fn default_tasks_path() -> Result<PathBuf> {
    Ok(app_dir()?.join("tasks.json"))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the remote task service. Absent means sync stays
    /// disconnected, which is not an error.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Connect and request timeout, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    5
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Overrides the default tasks.json location
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn config_path() -> Result<PathBuf> {
    Ok(app_dir()?.join("config.toml"))
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = config_path()?;
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Remote base URL with the environment override applied.
    pub fn remote_url(&self) -> Option<String> {
        std::env::var(REMOTE_URL_ENV)
            .ok()
            .filter(|value| !value.is_empty())
            .or_else(|| self.remote.base_url.clone())
    }
}

pub fn save_config(config: &Config) -> Result<()> {
    let path = config_path()?;
    let content = toml::to_string_pretty(config)?;
    fs::write(&path, content)?;
    Ok(())
}
