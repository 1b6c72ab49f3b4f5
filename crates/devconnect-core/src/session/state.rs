//! Per-session chat state machine.

use serde::Serialize;

use super::message::{Attachment, Message};
use crate::error::{DevConnectError, Result};
use crate::persona::PersonaRecord;
use crate::user::{CreateProfileRequest, UserProfile};

/// Coarse phase of a session, derived from which fields are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No profile.
    LoggedOut,
    /// Profile present, no persona selected.
    NoSelection,
    /// Profile present and chatting with a persona.
    ChatActive,
}

impl SessionPhase {
    pub fn describe(&self) -> &'static str {
        match self {
            SessionPhase::LoggedOut => "logged out",
            SessionPhase::NoSelection => "no persona is selected",
            SessionPhase::ChatActive => "chatting",
        }
    }
}

/// State owned by a single interactive session.
///
/// The message log is append-only. It is only ever truncated as a whole: on
/// persona selection, on clear and on logout. A shared file is remembered in
/// `pending_attachment` until the next text message consumes it.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    profile: Option<UserProfile>,
    selected: Option<PersonaRecord>,
    messages: Vec<Message>,
    pending_attachment: Option<Attachment>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        match (&self.profile, &self.selected) {
            (None, _) => SessionPhase::LoggedOut,
            (Some(_), None) => SessionPhase::NoSelection,
            (Some(_), Some(_)) => SessionPhase::ChatActive,
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn selected(&self) -> Option<&PersonaRecord> {
        self.selected.as_ref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn pending_attachment(&self) -> Option<&Attachment> {
        self.pending_attachment.as_ref()
    }

    /// `LoggedOut -> NoSelection`.
    pub fn create_profile(&mut self, request: CreateProfileRequest) -> Result<&UserProfile> {
        let phase = self.phase();
        if phase != SessionPhase::LoggedOut {
            return Err(DevConnectError::InvalidTransition {
                action: "create a profile",
                phase: "logged in",
            });
        }
        let profile = request.into_profile()?;
        Ok(self.profile.insert(profile))
    }

    /// Selects (or re-selects) a chat partner and empties the chat.
    pub fn select_persona(&mut self, persona: PersonaRecord) -> Result<()> {
        if self.profile.is_none() {
            return Err(DevConnectError::NotLoggedIn);
        }
        self.selected = Some(persona);
        self.clear_chat();
        Ok(())
    }

    /// `NotLoggedIn` or `NoActiveChat` unless a chat is open.
    pub fn require_chat(&self) -> Result<()> {
        match self.phase() {
            SessionPhase::ChatActive => Ok(()),
            SessionPhase::LoggedOut => Err(DevConnectError::NotLoggedIn),
            SessionPhase::NoSelection => Err(DevConnectError::NoActiveChat),
        }
    }

    pub fn push_user_text(&mut self, text: impl Into<String>) -> Result<()> {
        self.require_chat()?;
        self.messages.push(Message::user_text(text));
        Ok(())
    }

    pub fn push_assistant_text(&mut self, text: impl Into<String>) -> Result<()> {
        self.require_chat()?;
        self.messages.push(Message::assistant_text(text));
        Ok(())
    }

    /// Appends one user message carrying the file and remembers it for the next reply.
    pub fn push_attachment(&mut self, attachment: Attachment) -> Result<()> {
        self.require_chat()?;
        self.pending_attachment = Some(attachment.clone());
        self.messages.push(Message::user_attachment(attachment));
        Ok(())
    }

    pub fn take_pending_attachment(&mut self) -> Option<Attachment> {
        self.pending_attachment.take()
    }

    /// Empties the chat. Idempotent and allowed in every phase.
    pub fn clear_chat(&mut self) {
        self.messages.clear();
        self.pending_attachment = None;
    }

    /// Any phase -> `LoggedOut`.
    pub fn logout(&mut self) {
        self.profile = None;
        self.selected = None;
        self.clear_chat();
    }
}
