//! Configuration file and path resolution.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// GitHub repository identity for the star badge. Unset means the badge is
/// disabled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GithubConfig {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub repo: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Override for where applications.json lives.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub github: GithubConfig,
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "jobtrack").context("could not determine a home directory")
}

impl Config {
    /// Load `config.toml` from the platform config directory. An absent file
    /// yields the default config.
    pub fn load() -> Result<Self> {
        let path = project_dirs()?.config_dir().join("config.toml");
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("invalid config at {}", path.display()))
    }

    /// Directory holding the applications slot.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(project_dirs()?.data_dir().to_path_buf()),
        }
    }

    /// Directory holding the star-count cache.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        Ok(project_dirs()?.cache_dir().to_path_buf())
    }
}
