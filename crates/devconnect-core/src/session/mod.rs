//! Session domain module.
//!
//! This module contains the chat message types and the per-session state
//! machine.
//!
//! # Module Structure
//!
//! - `message`: Chat message types (`MessageRole`, `Message`, `Attachment`)
//! - `state`: Session state machine (`SessionState`, `SessionPhase`)
//!
//! # Usage
//!
//! ```ignore
//! use devconnect_core::session::{SessionState, SessionPhase};
//! use devconnect_core::session::{Attachment, AttachmentKind, Message, MessageRole};
//! ```

mod message;
mod state;

// Re-export public API
pub use message::{Attachment, AttachmentKind, Message, MessageRole};
pub use state::{SessionPhase, SessionState};
