//! Secret service implementation.
//!
//! Reads the Gemini API key from `secret.json`, letting `GEMINI_API_KEY` or
//! `GOOGLE_API_KEY` override the file.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use devconnect_core::config::{GeminiConfig, SecretConfig};
use devconnect_core::error::{DevConnectError, Result};
use devconnect_core::secret::SecretService;

use crate::paths::DevConnectPaths;

/// Environment variables checked for an API key, in priority order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Service for loading secret configuration.
///
/// Loaded secrets are cached; key material never appears in logs or errors.
#[derive(Clone)]
pub struct SecretServiceImpl {
    path: PathBuf,
    use_env: bool,
    /// Cached secret config.
    secrets: Arc<RwLock<Option<SecretConfig>>>,
}

impl SecretServiceImpl {
    pub fn new(paths: &DevConnectPaths) -> Result<Self> {
        let path = paths
            .secret_file()
            .map_err(|e| DevConnectError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a service reading a specific file (for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            use_env: true,
            secrets: Arc::new(RwLock::new(None)),
        }
    }

    /// Ignores environment overrides and reads the file only.
    pub fn without_env_overrides(mut self) -> Self {
        self.use_env = false;
        self
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Creates `secret.json` with an empty key template if it does not exist.
    ///
    /// On Unix the file is restricted to the owner (600).
    pub fn ensure_secret_file(&self) -> Result<PathBuf> {
        if self.path.exists() {
            return Ok(self.path.clone());
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template_config = SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: String::new(),
            }),
        };
        let template_json = serde_json::to_string_pretty(&template_config)?;
        std::fs::write(&self.path, template_json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.path, permissions)?;
        }

        tracing::info!("[Secret] Created template at {}", self.path.display());
        Ok(self.path.clone())
    }

    fn load_secrets_internal(&self) -> Result<SecretConfig> {
        if let Some(cached) = self.secrets.read().ok().and_then(|guard| guard.clone()) {
            return Ok(cached);
        }

        let from_file = self.read_file()?;
        let loaded = if self.use_env {
            apply_env_overrides(from_file, |name| std::env::var(name).ok())
        } else {
            from_file
        };

        if let Ok(mut write_lock) = self.secrets.write() {
            *write_lock = Some(loaded.clone());
        }
        Ok(loaded)
    }

    fn read_file(&self) -> Result<SecretConfig> {
        if !self.path.exists() {
            return Ok(SecretConfig::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(SecretConfig::default());
        }
        // Parse errors from serde_json can quote input; report position only.
        serde_json::from_str(&content).map_err(|e| DevConnectError::Serialization {
            format: "JSON".to_string(),
            message: format!(
                "{} is not valid (line {}, column {})",
                self.path.display(),
                e.line(),
                e.column()
            ),
        })
    }
}

/// Replaces the file's key with the first non-blank environment key, if any.
pub fn apply_env_overrides<F>(mut secrets: SecretConfig, lookup: F) -> SecretConfig
where
    F: Fn(&str) -> Option<String>,
{
    let env_key = API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty());

    if let Some(api_key) = env_key {
        secrets.gemini = Some(GeminiConfig { api_key });
    }
    secrets
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        self.load_secrets_internal()
    }

    async fn secret_file_exists(&self) -> bool {
        self.path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_in(dir: &tempfile::TempDir) -> SecretServiceImpl {
        SecretServiceImpl::with_path(dir.path().join("secret.json")).without_env_overrides()
    }

    #[tokio::test]
    async fn test_missing_file_has_no_key() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(&dir);
        assert!(!service.secret_file_exists().await);
        let secrets = service.load_secrets().await.unwrap();
        assert!(secrets.gemini_api_key().is_none());
    }

    #[tokio::test]
    async fn test_reads_key_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(&dir);
        std::fs::write(service.path(), r#"{"gemini": {"api_key": "AIzaFromFile"}}"#).unwrap();

        let secrets = service.load_secrets().await.unwrap();
        assert_eq!(secrets.gemini_api_key(), Some("AIzaFromFile"));
    }

    #[tokio::test]
    async fn test_invalid_json_error_does_not_echo_content() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(&dir);
        std::fs::write(service.path(), r#"{"gemini": {"api_key": "AIzaLeak"#).unwrap();

        let err = service.load_secrets().await.unwrap_err();
        assert!(!err.to_string().contains("AIzaLeak"));
    }

    #[tokio::test]
    async fn test_ensure_secret_file_creates_template() {
        let dir = tempfile::tempdir().unwrap();
        let service = SecretServiceImpl::with_path(dir.path().join("nested").join("secret.json"))
            .without_env_overrides();

        let path = service.ensure_secret_file().unwrap();
        assert!(path.exists());
        assert!(service.secret_file_exists().await);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }

        // Template has an empty key, which counts as missing.
        let secrets = service.load_secrets().await.unwrap();
        assert!(secrets.gemini_api_key().is_none());
    }

    #[test]
    fn test_env_override_priority() {
        let file: SecretConfig =
            serde_json::from_str(r#"{"gemini": {"api_key": "file"}}"#).unwrap();

        let merged = apply_env_overrides(file.clone(), |name| match name {
            "GEMINI_API_KEY" => Some("gemini-env".to_string()),
            "GOOGLE_API_KEY" => Some("google-env".to_string()),
            _ => None,
        });
        assert_eq!(merged.gemini_api_key(), Some("gemini-env"));

        let merged = apply_env_overrides(file.clone(), |name| match name {
            "GEMINI_API_KEY" => Some("   ".to_string()),
            "GOOGLE_API_KEY" => Some("google-env".to_string()),
            _ => None,
        });
        assert_eq!(merged.gemini_api_key(), Some("google-env"));

        let merged = apply_env_overrides(file, |_| None);
        assert_eq!(merged.gemini_api_key(), Some("file"));
    }
}
