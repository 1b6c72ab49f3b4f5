//! Matchmaking result types.
//!
//! The matchmaker asks the model to pick one persona for a user bio. The raw
//! answer is a [`MatchResult`]; once the name has been resolved against the
//! directory it becomes a [`MatchedPersona`]. Every way this can go wrong is a
//! [`MatchFailure`] value rather than a panic.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::agent::GenerationError;
use crate::persona::PersonaRecord;

/// The model's pick, as parsed from its JSON answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Persona name; must equal a directory name exactly
    pub name: String,
    /// Free-text justification
    pub reason: String,
}

/// A match whose name resolved to a directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedPersona {
    pub persona: PersonaRecord,
    pub reason: String,
}

/// Why matchmaking produced no usable persona.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchFailure {
    /// The remote call failed or timed out.
    #[error("Matchmaking request failed: {0}")]
    Remote(#[from] GenerationError),

    /// The answer was not a `{"name", "reason"}` JSON object.
    #[error("Malformed matchmaking response: {0}")]
    Malformed(String),

    /// The model named someone who is not in the community.
    #[error("Matched persona '{0}' is not in the community")]
    UnknownPersona(String),
}

impl MatchFailure {
    /// Short text for the failure banner.
    ///
    /// A rate-limited request carries the server's wait hint; a request the
    /// server refused outright names its status, since retrying will not help.
    pub fn user_message(&self) -> String {
        match self {
            MatchFailure::Remote(GenerationError::Timeout(_)) => {
                "AI took too long. Try again.".to_string()
            }
            MatchFailure::Remote(GenerationError::Request {
                retry_after: Some(wait),
                ..
            }) => format!("AI busy. Retry in {}s.", wait.as_secs().max(1)),
            MatchFailure::Remote(GenerationError::Request {
                status_code: Some(code),
                is_retryable: false,
                ..
            }) => format!("AI rejected the request (HTTP {code})."),
            MatchFailure::Remote(_) | MatchFailure::Malformed(_) => "AI busy.".to_string(),
            MatchFailure::UnknownPersona(_) => {
                "AI suggested someone who is not in the community.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_match_result_parses_minimal_object() {
        let parsed: MatchResult =
            serde_json::from_str(r#"{"name":"Alice Chen","reason":"UI focus"}"#).unwrap();
        assert_eq!(parsed.name, "Alice Chen");
        assert_eq!(parsed.reason, "UI focus");
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(MatchFailure::Malformed("x".into()).user_message(), "AI busy.");
        assert_eq!(
            MatchFailure::Remote(GenerationError::EmptyResponse).user_message(),
            "AI busy."
        );
        assert!(
            MatchFailure::Remote(GenerationError::Timeout(Duration::from_secs(1)))
                .user_message()
                .contains("too long")
        );
        assert!(
            MatchFailure::UnknownPersona("Zed".into())
                .user_message()
                .contains("not in the community")
        );
    }

    #[test]
    fn test_request_failure_banner_uses_retry_hints() {
        let throttled = MatchFailure::Remote(GenerationError::Request {
            status_code: Some(429),
            message: "quota".to_string(),
            is_retryable: true,
            retry_after: Some(Duration::from_secs(12)),
        });
        assert_eq!(throttled.user_message(), "AI busy. Retry in 12s.");

        let sub_second = MatchFailure::Remote(GenerationError::Request {
            status_code: Some(503),
            message: "overloaded".to_string(),
            is_retryable: true,
            retry_after: Some(Duration::from_millis(200)),
        });
        assert_eq!(sub_second.user_message(), "AI busy. Retry in 1s.");

        let overloaded = MatchFailure::Remote(GenerationError::Request {
            status_code: Some(503),
            message: "overloaded".to_string(),
            is_retryable: true,
            retry_after: None,
        });
        assert_eq!(overloaded.user_message(), "AI busy.");

        let forbidden = MatchFailure::Remote(GenerationError::Request {
            status_code: Some(403),
            message: "API key not valid".to_string(),
            is_retryable: false,
            retry_after: None,
        });
        assert_eq!(forbidden.user_message(), "AI rejected the request (HTTP 403).");
    }
}
