//! Configuration models.
//!
//! `AppConfig` mirrors `config.toml`; `SecretConfig` mirrors `secret.json`.
//! Loading lives in `devconnect-infrastructure`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Model used when discovery is skipped or fails.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
/// Model preferred when discovery lists it.
pub const PREFERRED_MODEL: &str = "models/gemini-1.5-flash";
/// Gemini REST endpoint for model resources.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub model: ModelSettings,
}

/// `[model]` section.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ModelSettings {
    pub default_model: String,
    pub preferred_model: String,
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            default_model: DEFAULT_MODEL.to_string(),
            preferred_model: PREFERRED_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ModelSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Root of `secret.json`.
#[derive(Deserialize, Serialize, Clone, Default)]
pub struct SecretConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini: Option<GeminiConfig>,
}

impl SecretConfig {
    /// The Gemini API key, if present and non-blank.
    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini
            .as_ref()
            .map(|g| g.api_key.trim())
            .filter(|key| !key.is_empty())
    }
}

// Keys must never end up in logs.
impl std::fmt::Debug for SecretConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretConfig")
            .field("gemini", &self.gemini.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Deserialize, Serialize, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
}
