//! Speech synthesis collaborator trait.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the speech synthesis backend.
#[derive(Error, Debug)]
pub enum SpeechError {
    /// The request could not be sent or timed out.
    #[error("speech request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("speech backend error ({status_code:?}): {message}")]
    Backend {
        status_code: Option<u16>,
        message: String,
    },

    /// Nothing to synthesize.
    #[error("no speakable text")]
    EmptyText,
}

/// A text-to-speech backend producing encoded audio bytes.
///
/// May fail; callers degrade to "no audio produced" rather than raising.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesizes `text` in the language identified by `lang` into
    /// encoded audio bytes (MP3).
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, SpeechError>;
}
