use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, SetupError};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub release: ReleaseConfig,
}

/// Where releases of the tool are published and what they are called.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReleaseConfig {
    #[serde(default = "default_owner")]
    pub owner: String,

    #[serde(default = "default_repo")]
    pub repo: String,

    /// Tool name used in archive and binary file names
    #[serde(default = "default_tool")]
    pub tool: String,

    #[serde(default = "default_server_url")]
    pub server_url: String,

    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            repo: default_repo(),
            tool: default_tool(),
            server_url: default_server_url(),
            api_url: default_api_url(),
        }
    }
}

fn default_owner() -> String {
    "PlanktoScope".to_string()
}

fn default_repo() -> String {
    "forklift".to_string()
}

fn default_tool() -> String {
    "forklift".to_string()
}

fn default_server_url() -> String {
    "https://github.com".to_string()
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

impl Config {
    /// Load configuration from file, falling back to defaults if it is absent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No configuration at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| SetupError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load from an explicit path, or from the default location
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::load(&Self::default_path()),
        }
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("setup-forklift.toml"))
            .unwrap_or_else(|| PathBuf::from("~/.config/setup-forklift.toml"))
    }
}
