//! Unified path management for Parley files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/parley/            # Config directory
//! └── config.toml              # Client configuration
//!
//! ~/.local/share/parley/       # Data directory
//! └── logs/                    # Application logs
//!     └── parley.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

use parley_core::ParleyError;

const APP_DIR: &str = "parley";

pub struct ParleyPaths;

impl ParleyPaths {
    /// Returns the Parley configuration directory (e.g. `~/.config/parley/`).
    pub fn config_dir() -> Result<PathBuf, ParleyError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| ParleyError::config("Cannot find config directory"))
    }

    /// Returns the Parley data directory (e.g. `~/.local/share/parley/`).
    pub fn data_dir() -> Result<PathBuf, ParleyError> {
        dirs::data_local_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| ParleyError::config("Cannot find data directory"))
    }

    pub fn config_file() -> Result<PathBuf, ParleyError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn log_dir() -> Result<PathBuf, ParleyError> {
        Ok(Self::data_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_lives_in_config_dir() {
        if let (Ok(dir), Ok(file)) = (ParleyPaths::config_dir(), ParleyPaths::config_file()) {
            assert!(dir.ends_with(APP_DIR));
            assert_eq!(file.parent(), Some(dir.as_path()));
        }
    }

    #[test]
    fn test_log_dir_lives_in_data_dir() {
        if let (Ok(data), Ok(logs)) = (ParleyPaths::data_dir(), ParleyPaths::log_dir()) {
            assert!(logs.starts_with(data));
        }
    }
}
