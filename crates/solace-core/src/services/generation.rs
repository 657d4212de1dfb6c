//! Generative text collaborator trait.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the generative text backend.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The request could not be sent or timed out.
    #[error("generation request failed: {message}")]
    Request { message: String, is_timeout: bool },

    /// The backend answered with a non-success status.
    #[error("generation backend error ({status_code:?}): {message}")]
    Backend {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
    },

    /// The backend answered but produced no usable text.
    #[error("generation backend returned no text")]
    EmptyResponse,

    /// Anything else.
    #[error("generation failed: {0}")]
    Other(String),
}

/// A generative text backend.
///
/// May fail; callers map failures to a literal error-text result rather
/// than propagating them to the user.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates a completion for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
