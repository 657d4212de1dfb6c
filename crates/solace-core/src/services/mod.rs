//! Remote collaborator traits.
//!
//! The assembler depends on three remote capabilities: text generation,
//! translation, and speech synthesis. Each is a trait with its own error
//! type so callers can decide how a failure degrades (literal error text,
//! pass-through, "no audio") instead of the client deciding for them.

mod generation;
mod speech;
mod translation;

pub use generation::{GenerationError, TextGenerator};
pub use speech::{SpeechError, SpeechSynthesizer};
pub use translation::{TranslationError, Translator};
