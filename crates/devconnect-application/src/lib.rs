//! Application layer for Dev Connect.
//!
//! This crate provides the chat use case, which coordinates the session
//! state machine with the matchmaking and roleplay agents.

pub mod chat_service;
pub mod session;

pub use chat_service::{ChatService, ChatTurn, MatchOutcome};
pub use session::SessionRegistry;
