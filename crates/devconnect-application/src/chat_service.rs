//! Chat use case implementation.
//!
//! `ChatService` owns one session's [`SessionState`] and drives it through
//! the matchmaker and the roleplay responder. It is the only place that
//! decides how remote failures are recovered: a failed match leaves the
//! session untouched, a failed reply is replaced by fallback text.

use std::sync::Arc;
use std::time::Duration;

use devconnect_core::agent::TextGenerator;
use devconnect_core::error::{DevConnectError, Result};
use devconnect_core::matchmaking::{MatchFailure, MatchedPersona};
use devconnect_core::persona::{PersonaDirectory, PersonaRecord};
use devconnect_core::session::{Attachment, SessionPhase, SessionState};
use devconnect_core::user::{CreateProfileRequest, UserProfile};
use devconnect_interaction::{
    AttachmentHint, MatchSelector, ReplyFailure, RoleplayReply, RoleplayResponder,
};
use tokio::sync::Mutex;

/// Outcome of a matchmaking request that reached the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The match was applied: the persona is selected and the chat is empty.
    Matched(MatchedPersona),
    /// Nothing changed in the session.
    Failed(MatchFailure),
}

/// Result of one text turn. The reply is always appended to the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub persona: PersonaRecord,
    pub reply: String,
    /// Set when `reply` is fallback text rather than a generated answer.
    pub failure: Option<ReplyFailure>,
}

struct ChatBackend {
    selector: MatchSelector,
    responder: RoleplayResponder,
    model: String,
}

/// Use case for a single interactive chat session.
///
/// Every action takes the session lock for its whole duration, including the
/// remote call, so actions never overlap within one session.
pub struct ChatService {
    directory: Arc<PersonaDirectory>,
    backend: Option<ChatBackend>,
    state: Mutex<SessionState>,
}

impl ChatService {
    /// Creates a session.
    ///
    /// Without a generator the session stays usable for browsing, but
    /// joining, matchmaking and chatting report `ConfigurationMissing`.
    pub fn new(
        directory: Arc<PersonaDirectory>,
        generator: Option<Arc<dyn TextGenerator>>,
        timeout: Duration,
    ) -> Self {
        let backend = generator.map(|generator| ChatBackend {
            model: generator.model().to_string(),
            selector: MatchSelector::new(generator.clone(), directory.clone()).with_timeout(timeout),
            responder: RoleplayResponder::new(generator, directory.clone()).with_timeout(timeout),
        });
        Self {
            directory,
            backend,
            state: Mutex::new(SessionState::new()),
        }
    }

    pub fn directory(&self) -> &PersonaDirectory {
        &self.directory
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Model identifier in use, if configured.
    pub fn model(&self) -> Option<&str> {
        self.backend.as_ref().map(|b| b.model.as_str())
    }

    fn backend(&self) -> Result<&ChatBackend> {
        self.backend.as_ref().ok_or_else(|| {
            DevConnectError::ConfigurationMissing("no Gemini API key configured".to_string())
        })
    }

    /// A copy of the current session state for rendering.
    pub async fn snapshot(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    pub async fn phase(&self) -> SessionPhase {
        self.state.lock().await.phase()
    }

    /// Fails with `NotLoggedIn` or `NoActiveChat` unless a chat is open.
    pub async fn require_active_chat(&self) -> Result<()> {
        self.state.lock().await.require_chat()
    }

    /// Joins the community. Requires a configured generator.
    pub async fn create_profile(&self, request: CreateProfileRequest) -> Result<UserProfile> {
        self.backend()?;
        let mut state = self.state.lock().await;
        let profile = state.create_profile(request)?.clone();
        tracing::info!("[Chat] Profile created for {}", profile.name);
        Ok(profile)
    }

    /// Starts a chat with the named persona, emptying the chat log.
    pub async fn select_persona(&self, name: &str) -> Result<PersonaRecord> {
        let persona = self.directory.find_by_name(name)?.clone();
        self.apply_selection(persona).await
    }

    /// Starts a chat with the persona with the given id, emptying the chat log.
    pub async fn select_persona_by_id(&self, id: u32) -> Result<PersonaRecord> {
        let persona = self.directory.find_by_id(id)?.clone();
        self.apply_selection(persona).await
    }

    async fn apply_selection(&self, persona: PersonaRecord) -> Result<PersonaRecord> {
        let mut state = self.state.lock().await;
        state.select_persona(persona.clone())?;
        tracing::info!("[Chat] Started chat with {}", persona.name);
        Ok(persona)
    }

    /// Asks the model for the best match for the user's bio and applies it.
    ///
    /// Errors are reserved for preconditions (not logged in, not configured);
    /// a failed match is `Ok(MatchOutcome::Failed)` and leaves the session as it was.
    pub async fn request_match(&self) -> Result<MatchOutcome> {
        let backend = self.backend()?;
        let mut state = self.state.lock().await;
        let bio = state
            .profile()
            .map(|p| p.bio.clone())
            .ok_or(DevConnectError::NotLoggedIn)?;

        match backend.selector.select_match(&bio).await {
            Ok(matched) => {
                state.select_persona(matched.persona.clone())?;
                tracing::info!("[Chat] Match applied: {}", matched.persona.name);
                Ok(MatchOutcome::Matched(matched))
            }
            Err(failure) => {
                tracing::warn!("[Chat] Match failed: {}", failure);
                Ok(MatchOutcome::Failed(failure))
            }
        }
    }

    /// Sends a text message and appends exactly one reply.
    ///
    /// A file shared just before is passed to the persona as context and
    /// consumed by this turn.
    pub async fn send_text(&self, text: &str) -> Result<ChatTurn> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DevConnectError::validation("Message cannot be empty"));
        }
        let backend = self.backend()?;

        let mut state = self.state.lock().await;
        state.push_user_text(text)?;
        let persona = state
            .selected()
            .cloned()
            .ok_or(DevConnectError::NoActiveChat)?;
        let hint = state
            .take_pending_attachment()
            .map(|attachment| AttachmentHint::from(&attachment));

        let RoleplayReply { text: reply, failure } = backend
            .responder
            .reply(text, &persona.name, hint.as_ref())
            .await;

        state.push_assistant_text(reply.clone())?;
        Ok(ChatTurn {
            persona,
            reply,
            failure,
        })
    }

    /// Shares a file into the chat. Does not trigger a reply.
    pub async fn send_attachment(&self, attachment: Attachment) -> Result<()> {
        let mut state = self.state.lock().await;
        tracing::info!(
            "[Chat] Attachment shared: {} ({}, {} bytes)",
            attachment.file_name,
            attachment.media_type,
            attachment.size()
        );
        state.push_attachment(attachment)
    }

    pub async fn clear_chat(&self) {
        self.state.lock().await.clear_chat();
    }

    pub async fn logout(&self) {
        self.state.lock().await.logout();
        tracing::info!("[Chat] Logged out");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use devconnect_core::agent::GenerationError;

    struct FixedGenerator(&'static str);

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        fn model(&self) -> &str {
            "fixed"
        }

        async fn generate(&self, _prompt: &str) -> std::result::Result<String, GenerationError> {
            Ok(self.0.to_string())
        }
    }

    fn service(generator: Option<Arc<dyn TextGenerator>>) -> ChatService {
        ChatService::new(
            Arc::new(PersonaDirectory::builtin()),
            generator,
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn test_unconfigured_service_refuses_to_join() {
        let service = service(None);
        assert!(!service.is_configured());
        let err = service
            .create_profile(CreateProfileRequest::new("Sam", "Go"))
            .await
            .unwrap_err();
        assert!(err.is_configuration_missing());
        assert_eq!(service.phase().await, SessionPhase::LoggedOut);
    }

    #[tokio::test]
    async fn test_browse_works_without_configuration() {
        let service = service(None);
        assert_eq!(service.directory().len(), 12);
    }

    #[tokio::test]
    async fn test_select_unknown_persona() {
        let service = service(Some(Arc::new(FixedGenerator("ok"))));
        service
            .create_profile(CreateProfileRequest::new("Sam", "Go"))
            .await
            .unwrap();
        let err = service.select_persona("Nobody").await.unwrap_err();
        assert!(err.is_unknown_persona());
        assert_eq!(service.phase().await, SessionPhase::NoSelection);
    }

    #[tokio::test]
    async fn test_select_by_id() {
        let service = service(Some(Arc::new(FixedGenerator("ok"))));
        service
            .create_profile(CreateProfileRequest::new("Sam", "Go"))
            .await
            .unwrap();
        let persona = service.select_persona_by_id(12).await.unwrap();
        assert_eq!(persona.name, "Leo Messi");
        assert_eq!(service.phase().await, SessionPhase::ChatActive);
    }

    #[tokio::test]
    async fn test_blank_message_is_rejected() {
        let service = service(Some(Arc::new(FixedGenerator("ok"))));
        service
            .create_profile(CreateProfileRequest::new("Sam", "Go"))
            .await
            .unwrap();
        service.select_persona("Bob Smith").await.unwrap();
        assert!(matches!(
            service.send_text("   ").await,
            Err(DevConnectError::Validation(_))
        ));
        assert!(service.snapshot().await.messages().is_empty());
    }

    #[tokio::test]
    async fn test_send_text_without_selection() {
        let service = service(Some(Arc::new(FixedGenerator("ok"))));
        service
            .create_profile(CreateProfileRequest::new("Sam", "Go"))
            .await
            .unwrap();
        assert_eq!(
            service.send_text("hi").await.unwrap_err(),
            DevConnectError::NoActiveChat
        );
    }

    #[tokio::test]
    async fn test_require_active_chat_follows_phase() {
        let service = service(Some(Arc::new(FixedGenerator("ok"))));
        assert_eq!(
            service.require_active_chat().await.unwrap_err(),
            DevConnectError::NotLoggedIn
        );
        service
            .create_profile(CreateProfileRequest::new("Sam", "Go"))
            .await
            .unwrap();
        assert_eq!(
            service.require_active_chat().await.unwrap_err(),
            DevConnectError::NoActiveChat
        );
        service.select_persona("Bob Smith").await.unwrap();
        assert!(service.require_active_chat().await.is_ok());
    }

    #[tokio::test]
    async fn test_request_match_requires_login() {
        let service = service(Some(Arc::new(FixedGenerator("{}"))));
        assert_eq!(
            service.request_match().await.unwrap_err(),
            DevConnectError::NotLoggedIn
        );
    }
}
