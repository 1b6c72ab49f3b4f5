//! Adapters to the hosted model and the prompt policy built on top of it.
//!
//! - [`GeminiApiAgent`]: `TextGenerator` over the Gemini REST API, plus model discovery
//! - [`MatchSelector`]: picks the best persona for a user bio
//! - [`RoleplayResponder`]: answers a chat turn in character

pub mod gemini_api_agent;
pub mod matchmaker;
pub mod persona_agent;
pub mod prompts;

pub use gemini_api_agent::{GeminiApiAgent, select_model};
pub use matchmaker::{MatchSelector, parse_match_response};
pub use persona_agent::{
    FILLER_REPLY, PERSONA_LEFT_REPLY, ReplyFailure, RoleplayReply, RoleplayResponder,
};
pub use prompts::AttachmentHint;
