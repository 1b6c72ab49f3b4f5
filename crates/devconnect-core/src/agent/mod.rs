//! Text generation contract.
//!
//! The core depends on the hosted model only through [`TextGenerator`]:
//! a prompt goes in, text or a [`GenerationError`] comes out. Implementations
//! live in `devconnect-interaction`.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Failure of a remote generation call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The request failed at the transport or HTTP level.
    #[error("Generation request failed: {message}")]
    Request {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
        retry_after: Option<Duration>,
    },

    /// The call did not finish within the configured timeout.
    #[error("Generation timed out after {0:?}")]
    Timeout(Duration),

    /// The model answered without any text.
    #[error("Model returned no text")]
    EmptyResponse,

    /// Model discovery found nothing usable for `generateContent`.
    #[error("No model supporting generateContent is available")]
    NoModelAvailable,

    /// Anything else (unparseable response body, etc.).
    #[error("{0}")]
    Other(String),
}

impl GenerationError {
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            status_code: None,
            message: message.into(),
            is_retryable: false,
            retry_after: None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request { is_retryable, .. } => *is_retryable,
            Self::Timeout(_) => true,
            _ => false,
        }
    }

    /// HTTP status of a rejected request, if there was one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Request { status_code, .. } => *status_code,
            _ => None,
        }
    }
}

/// A hosted text-generation capability.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Identifier of the model requests are sent to.
    fn model(&self) -> &str;

    /// Sends a single natural-language instruction and returns the generated text.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Runs a generation call bounded by `limit`.
///
/// An elapsed limit is reported as [`GenerationError::Timeout`].
pub async fn generate_with_timeout(
    generator: &dyn TextGenerator,
    prompt: &str,
    limit: Duration,
) -> Result<String, GenerationError> {
    tokio::time::timeout(limit, generator.generate(prompt))
        .await
        .unwrap_or(Err(GenerationError::Timeout(limit)))
}
