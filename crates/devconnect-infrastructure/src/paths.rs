//! Unified path management for Dev Connect configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/devconnect/        # Config directory (platform default via `dirs`)
//! ├── config.toml              # Model settings
//! ├── secret.json              # API keys
//! └── logs/                    # Application logs
//!     └── devconnect.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "devconnect";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves Dev Connect's files, either under the platform config directory
/// or under an explicit base directory (`--config-dir`, tests).
#[derive(Debug, Clone)]
pub struct DevConnectPaths {
    base: Option<PathBuf>,
}

impl DevConnectPaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    /// Returns the path to `config.toml`.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to `secret.json`.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600).
    pub fn secret_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("secret.json"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }
}

impl Default for DevConnectPaths {
    fn default() -> Self {
        Self::new(None)
    }
}
