//! Error types for the Dev Connect application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Dev Connect application.
///
/// Remote generation failures are not represented here; they travel as
/// [`crate::agent::GenerationError`] inside the matchmaking and reply
/// result types so that callers choose the recovery.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DevConnectError {
    /// A persona name or id that is not in the directory
    #[error("Unknown persona: '{name}'")]
    UnknownPersona { name: String },

    /// Two roster entries share a name or id
    #[error("Duplicate persona in roster: '{0}'")]
    DuplicatePersona(String),

    /// The requested action is not allowed in the current session phase
    #[error("Cannot {action} while {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: &'static str,
    },

    /// The action requires a user profile
    #[error("No user profile; create one first")]
    NotLoggedIn,

    /// The action requires a selected persona
    #[error("No active chat; select a persona first")]
    NoActiveChat,

    /// The external generation capability is not configured
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    /// Input validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },
}

impl DevConnectError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an UnknownPersona error
    pub fn unknown_persona(name: impl Into<String>) -> Self {
        Self::UnknownPersona { name: name.into() }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an UnknownPersona error
    pub fn is_unknown_persona(&self) -> bool {
        matches!(self, Self::UnknownPersona { .. })
    }

    /// Check if this is a ConfigurationMissing error
    pub fn is_configuration_missing(&self) -> bool {
        matches!(self, Self::ConfigurationMissing(_))
    }

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for DevConnectError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for DevConnectError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DevConnectError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, DevConnectError>`.
pub type Result<T> = std::result::Result<T, DevConnectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_persona_message() {
        let err = DevConnectError::unknown_persona("Zed");
        assert!(err.is_unknown_persona());
        assert_eq!(err.to_string(), "Unknown persona: 'Zed'");
    }

    #[test]
    fn test_io_conversion_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: DevConnectError = io.into();
        assert!(err.is_io());
        assert!(err.to_string().contains("NotFound"));
    }

    #[test]
    fn test_parse_errors_become_serialization_errors() {
        let toml_err = toml::from_str::<toml::Value>("[model\nbroken").unwrap_err();
        let err: DevConnectError = toml_err.into();
        assert!(matches!(err, DevConnectError::Serialization { ref format, .. } if format == "TOML"));

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DevConnectError = json_err.into();
        assert!(matches!(err, DevConnectError::Serialization { ref format, .. } if format == "JSON"));
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = DevConnectError::InvalidTransition {
            action: "create a profile",
            phase: "logged in",
        };
        assert_eq!(err.to_string(), "Cannot create a profile while logged in");
    }
}
