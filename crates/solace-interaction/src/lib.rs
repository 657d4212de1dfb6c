//! Remote service clients for Solace.
//!
//! Implementations of the domain's collaborator traits: Gemini text
//! generation, translation, and speech synthesis, plus the audio artifact
//! dispatch service.

pub mod audio;
pub mod gemini_client;
pub mod speech_client;
pub mod translate_client;

pub use audio::SpeechService;
pub use gemini_client::GeminiTextClient;
pub use speech_client::GoogleSpeechClient;
pub use translate_client::GoogleTranslateClient;
