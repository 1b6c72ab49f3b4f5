//! Domain layer for Dev Connect.
//!
//! Holds the persona roster, the per-session chat state machine, the
//! matchmaking result types and the narrow `TextGenerator` contract that the
//! interaction layer implements against a hosted model.

pub mod agent;
pub mod config;
pub mod error;
pub mod matchmaking;
pub mod persona;
pub mod secret;
pub mod session;
pub mod user;

// Re-export common error type
pub use error::DevConnectError;
