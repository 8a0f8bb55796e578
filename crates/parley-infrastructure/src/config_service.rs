//! Client configuration loading.
//!
//! Resolution order, later wins:
//! 1. Built-in defaults (`http://localhost:4000/api`, 10 s timeout)
//! 2. `~/.config/parley/config.toml`
//! 3. `PARLEY_API_URL` / `PARLEY_API_TIMEOUT_SECS`

use std::path::{Path, PathBuf};
use std::time::Duration;

use parley_core::ParleyError;
use parley_core::config::ClientConfig;
use serde::Deserialize;

use crate::paths::ParleyPaths;

/// On-disk shape of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    fn apply(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(url) = self.api_url.as_deref().filter(|u| !u.trim().is_empty()) {
            config = config.with_base_url(url);
        }
        if let Some(secs) = self.timeout_secs.filter(|s| *s > 0) {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}

#[derive(Debug, Clone)]
pub struct ConfigService {
    config_path: Option<PathBuf>,
}

impl ConfigService {
    /// Uses the platform config file, if a config directory exists.
    pub fn new_default() -> Self {
        Self {
            config_path: ParleyPaths::config_file().ok(),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Loads configuration from the file and the process environment.
    pub fn load(&self) -> Result<ClientConfig, ParleyError> {
        self.load_with(|key| std::env::var(key).ok())
    }

    /// Loads configuration from the file and an arbitrary variable lookup.
    pub fn load_with<F>(&self, lookup: F) -> Result<ClientConfig, ParleyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = self.read_file()?;
        let config = file.apply(ClientConfig::default()).apply_overrides(lookup);
        tracing::debug!(
            base_url = config.base_url(),
            timeout_secs = config.timeout().as_secs(),
            "[Config] Resolved client configuration"
        );
        Ok(config)
    }

    fn read_file(&self) -> Result<ConfigFile, ParleyError> {
        let Some(path) = self.config_path.as_deref() else {
            return Ok(ConfigFile::default());
        };
        if !path.exists() {
            tracing::debug!("[Config] No config file at {:?}, using defaults", path);
            return Ok(ConfigFile::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            ParleyError::io(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&content)?)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new_default()
    }
}
