//! RoleplayResponder - produces one in-character reply per chat turn.

use std::sync::Arc;
use std::time::Duration;

use devconnect_core::agent::{GenerationError, TextGenerator, generate_with_timeout};
use devconnect_core::config::DEFAULT_REQUEST_TIMEOUT_SECS;
use devconnect_core::persona::PersonaDirectory;
use thiserror::Error;

use crate::prompts::{AttachmentHint, RoleplayPrompt, ToPrompt};

/// Shown in place of a reply when the persona is not in the directory.
pub const PERSONA_LEFT_REPLY: &str = "Error: User left.";
/// Shown in place of a reply when generation fails.
pub const FILLER_REPLY: &str = "...";

/// Why no generated reply is available.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplyFailure {
    /// The persona is not (or no longer) in the directory; nothing was sent.
    #[error("Persona '{0}' left the chat")]
    PersonaLeft(String),

    /// The prompt could not be rendered.
    #[error("Failed to build roleplay prompt: {0}")]
    Prompt(String),

    /// The remote call failed or timed out.
    #[error("Reply generation failed: {0}")]
    Remote(#[from] GenerationError),
}

impl ReplyFailure {
    /// In-band text that stands in for the reply in the chat log.
    pub fn fallback_text(&self) -> &'static str {
        match self {
            ReplyFailure::PersonaLeft(_) => PERSONA_LEFT_REPLY,
            ReplyFailure::Prompt(_) | ReplyFailure::Remote(_) => FILLER_REPLY,
        }
    }
}

/// The text to append for a turn, and why it is a fallback if it is one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleplayReply {
    pub text: String,
    pub failure: Option<ReplyFailure>,
}

/// Asks the model to answer as a persona.
#[derive(Clone)]
pub struct RoleplayResponder {
    generator: Arc<dyn TextGenerator>,
    directory: Arc<PersonaDirectory>,
    timeout: Duration,
}

impl RoleplayResponder {
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

    /// Generates a reply, reporting every failure to the caller.
    pub async fn try_reply(
        &self,
        user_message: &str,
        persona_name: &str,
        attachment: Option<&AttachmentHint>,
    ) -> Result<String, ReplyFailure> {
        let persona = self
            .directory
            .find_by_name(persona_name)
            .map_err(|_| ReplyFailure::PersonaLeft(persona_name.to_string()))?;

        let prompt = RoleplayPrompt {
            persona,
            user_message,
            attachment,
        }
        .to_prompt()
        .map_err(|e| ReplyFailure::Prompt(e.to_string()))?;

        let reply = generate_with_timeout(self.generator.as_ref(), &prompt, self.timeout).await?;
        Ok(reply.trim().to_string())
    }

    /// Generates a reply, substituting the fallback text on failure.
    ///
    /// Always yields text to append; `failure` is set when that text is a fallback.
    pub async fn reply(
        &self,
        user_message: &str,
        persona_name: &str,
        attachment: Option<&AttachmentHint>,
    ) -> RoleplayReply {
        match self.try_reply(user_message, persona_name, attachment).await {
            Ok(text) => RoleplayReply {
                text,
                failure: None,
            },
            Err(failure) => {
                tracing::warn!("[Roleplay] {}: {}", persona_name, failure);
                RoleplayReply {
                    text: failure.fallback_text().to_string(),
                    failure: Some(failure),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use devconnect_core::session::AttachmentKind;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingGenerator {
        calls: Mutex<Vec<String>>,
        fail: bool,
    }

    impl RecordingGenerator {
        fn last_call(&self) -> Option<String> {
            self.calls.lock().unwrap().last().cloned()
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        fn model(&self) -> &str {
            "recording"
        }

        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            self.calls.lock().unwrap().push(prompt.to_string());
            if self.fail {
                Err(GenerationError::request("quota exceeded"))
            } else {
                Ok("  Queries first, CSS never.  \n".to_string())
            }
        }
    }

    fn responder(generator: Arc<RecordingGenerator>) -> RoleplayResponder {
        RoleplayResponder::new(generator, Arc::new(PersonaDirectory::builtin()))
    }

    #[tokio::test]
    async fn test_reply_in_character() {
        let generator = Arc::new(RecordingGenerator::default());
        let reply = responder(generator.clone())
            .try_reply("hi", "Bob Smith", None)
            .await
            .unwrap();

        assert_eq!(reply, "Queries first, CSS never.");
        let prompt = generator.last_call().expect("call recorded");
        assert!(prompt.contains("You are Bob Smith."));
        assert!(prompt.contains("Logical & Blunt"));
        assert!(prompt.contains(r#"User said "hi""#));
    }

    #[tokio::test]
    async fn test_unknown_persona_makes_no_remote_call() {
        let generator = Arc::new(RecordingGenerator::default());
        let responder = responder(generator.clone());

        let failure = responder.try_reply("hi", "Nobody", None).await.unwrap_err();
        assert_eq!(failure, ReplyFailure::PersonaLeft("Nobody".to_string()));

        let reply = responder.reply("hi", "Nobody", None).await;
        assert_eq!(reply.text, PERSONA_LEFT_REPLY);
        assert_eq!(reply.failure, Some(failure));
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_remote_failure_yields_filler() {
        let generator = Arc::new(RecordingGenerator {
            fail: true,
            ..Default::default()
        });
        let responder = responder(generator);

        let failure = responder.try_reply("hi", "Bob Smith", None).await.unwrap_err();
        assert!(matches!(failure, ReplyFailure::Remote(_)));

        let reply = responder.reply("hi", "Bob Smith", None).await;
        assert_eq!(reply.text, FILLER_REPLY);
        assert!(matches!(reply.failure, Some(ReplyFailure::Remote(_))));
    }

    #[tokio::test]
    async fn test_successful_reply_has_no_failure() {
        let generator = Arc::new(RecordingGenerator::default());
        let reply = responder(generator).reply("hi", "Bob Smith", None).await;
        assert_eq!(
            reply,
            RoleplayReply {
                text: "Queries first, CSS never.".to_string(),
                failure: None,
            }
        );
    }

    #[tokio::test]
    async fn test_attachment_hint_reaches_prompt() {
        let generator = Arc::new(RecordingGenerator::default());
        let hint = AttachmentHint::new("wireframe.png", AttachmentKind::Image);
        responder(generator.clone())
            .try_reply("what do you think?", "Alice Chen", Some(&hint))
            .await
            .unwrap();

        let prompt = generator.last_call().unwrap();
        assert!(prompt.contains("USER JUST SENT A FILE: wireframe.png (image)."));
    }
}
