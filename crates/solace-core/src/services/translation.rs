//! Translation collaborator trait.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the translation backend.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The request could not be sent or timed out.
    #[error("translation request failed: {0}")]
    Request(String),

    /// The response could not be parsed.
    #[error("translation response unreadable: {0}")]
    Malformed(String),
}

/// A text translation backend.
///
/// Implementations return the input unchanged for the base language
/// ("en"). On failure the caller degrades to the untranslated input; the
/// error exists so that choice is explicit at the call site.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translates `text` into the language identified by `target_lang`
    /// (a two-letter code).
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, TranslationError>;
}
