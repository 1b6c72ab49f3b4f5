//! Startup wiring: configuration, API key, model discovery and the chat service.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use devconnect_application::ChatService;
use devconnect_core::agent::TextGenerator;
use devconnect_core::config::SecretConfig;
use devconnect_core::persona::PersonaDirectory;
use devconnect_core::secret::SecretService;
use devconnect_infrastructure::{ConfigService, DevConnectPaths, SecretServiceImpl};
use devconnect_interaction::GeminiApiAgent;

use crate::cli::Args;

/// What the status line shows about the model connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelStatus {
    Online(String),
    /// Model listing failed; chatting is attempted with the configured default.
    KeyError(String),
    /// No API key anywhere; `secret.json` is where to put one.
    MissingKey(PathBuf),
}

pub struct Bootstrap {
    pub service: ChatService,
    pub status: ModelStatus,
}

/// The `--api-key` flag wins over whatever `secret.json` and the environment provide.
pub fn pick_api_key(flag: Option<&str>, secrets: &SecretConfig) -> Option<String> {
    flag.map(str::trim)
        .filter(|key| !key.is_empty())
        .or_else(|| secrets.gemini_api_key())
        .map(str::to_string)
}

pub async fn bootstrap(args: &Args, paths: &DevConnectPaths) -> Result<Bootstrap> {
    let config = ConfigService::new(paths)?
        .get_config()
        .context("Failed to load config.toml")?;
    let secret_service = SecretServiceImpl::new(paths)?;
    let secrets = secret_service
        .load_secrets()
        .await
        .context("Failed to load secret.json")?;

    let directory = Arc::new(PersonaDirectory::builtin());
    let timeout = config.model.request_timeout();

    let Some(api_key) = pick_api_key(args.api_key.as_deref(), &secrets) else {
        if let Err(e) = secret_service.ensure_secret_file() {
            tracing::warn!("[Bootstrap] Could not create secret template: {}", e);
        }
        tracing::warn!("[Bootstrap] No Gemini API key configured");
        return Ok(Bootstrap {
            service: ChatService::new(directory, None, timeout),
            status: ModelStatus::MissingKey(secret_service.path().clone()),
        });
    };

    let mut agent = GeminiApiAgent::from_settings(api_key, &config.model)?;
    let status = if let Some(model) = &args.model {
        agent = agent.with_model(model.clone());
        ModelStatus::Online(model.clone())
    } else if args.no_discovery {
        ModelStatus::Online(agent.model().to_string())
    } else {
        match agent.discover_model(&config.model.preferred_model).await {
            Ok(model) => ModelStatus::Online(model),
            Err(e) => {
                tracing::warn!("[Bootstrap] Model discovery failed: {}", e);
                ModelStatus::KeyError(agent.model().to_string())
            }
        }
    };

    tracing::info!("[Bootstrap] Model status: {:?}", status);
    let generator: Arc<dyn TextGenerator> = Arc::new(agent);
    Ok(Bootstrap {
        service: ChatService::new(directory, Some(generator), timeout),
        status,
    })
}
