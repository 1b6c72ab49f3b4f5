//! MatchSelector - asks the model to pick the best persona for a user.

use std::sync::Arc;
use std::time::Duration;

use devconnect_core::agent::{TextGenerator, generate_with_timeout};
use devconnect_core::config::DEFAULT_REQUEST_TIMEOUT_SECS;
use devconnect_core::matchmaking::{MatchFailure, MatchResult, MatchedPersona};
use devconnect_core::persona::PersonaDirectory;

use crate::prompts::{MatchmakingPrompt, ToPrompt};

/// Chooses one persona from the directory for a user bio.
///
/// The model's answer is only trusted after its name resolves in the
/// directory; a hallucinated name is a [`MatchFailure::UnknownPersona`].
#[derive(Clone)]
pub struct MatchSelector {
    generator: Arc<dyn TextGenerator>,
    directory: Arc<PersonaDirectory>,
    timeout: Duration,
}

impl MatchSelector {
    pub fn new(generator: Arc<dyn TextGenerator>, directory: Arc<PersonaDirectory>) -> Self {
        Self {
            generator,
            directory,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Runs one matchmaking round for `user_bio`.
    pub async fn select_match(&self, user_bio: &str) -> Result<MatchedPersona, MatchFailure> {
        let community_json = self
            .directory
            .to_json()
            .map_err(|e| MatchFailure::Malformed(format!("Failed to serialize community: {e}")))?;
        let prompt = MatchmakingPrompt {
            user_bio,
            community_json: &community_json,
        }
        .to_prompt()
        .map_err(|e| MatchFailure::Malformed(format!("Failed to render prompt: {e}")))?;

        let raw = generate_with_timeout(self.generator.as_ref(), &prompt, self.timeout)
            .await
            .inspect_err(|e| tracing::warn!("[Matchmaker] Remote call failed: {}", e))?;

        let result = parse_match_response(&raw)?;
        let persona = self
            .directory
            .find_by_name(&result.name)
            .map_err(|_| {
                tracing::warn!("[Matchmaker] Model named unknown persona '{}'", result.name);
                MatchFailure::UnknownPersona(result.name.clone())
            })?
            .clone();

        tracing::info!("[Matchmaker] Matched {}", persona.name);
        Ok(MatchedPersona {
            persona,
            reason: result.reason,
        })
    }
}

/// Parses the model's answer, tolerating a markdown code fence around the JSON.
pub fn parse_match_response(raw: &str) -> Result<MatchResult, MatchFailure> {
    let cleaned = raw.replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();
    serde_json::from_str::<MatchResult>(cleaned).map_err(|e| {
        tracing::debug!("[Matchmaker] Unparseable response: {}", e);
        MatchFailure::Malformed(e.to_string())
    })
}
