//! Configuration service implementation.
//!
//! Loads the application configuration from `config.toml`. A missing file
//! means defaults; a malformed file is an error so typos are not silently
//! ignored.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use devconnect_core::config::AppConfig;
use devconnect_core::error::{DevConnectError, Result};

use crate::paths::DevConnectPaths;

/// Configuration service that loads and caches `config.toml`.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    pub fn new(paths: &DevConnectPaths) -> Result<Self> {
        let path = paths
            .config_file()
            .map_err(|e| DevConnectError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a service reading a specific file (for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<AppConfig> {
        if let Some(cached) = self.read_cache() {
            return Ok(cached);
        }

        let loaded = self.load_config()?;
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = Some(loaded.clone());
        }
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    fn read_cache(&self) -> Option<AppConfig> {
        self.config.read().ok().and_then(|guard| guard.clone())
    }

    fn load_config(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            tracing::debug!("[Config] {} not found, using defaults", self.path.display());
            return Ok(AppConfig::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        let config: AppConfig = toml::from_str(&content)?;
        tracing::info!("[Config] Loaded {}", self.path.display());
        Ok(config)
    }
}
