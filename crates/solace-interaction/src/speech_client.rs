//! Speech synthesis client over the public Google Translate TTS endpoint.
//!
//! The endpoint accepts short utterances only, so longer text is split on
//! sentence boundaries and the returned MP3 frames are concatenated.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use solace_core::services::{SpeechError, SpeechSynthesizer};

const BASE_URL: &str = "https://translate.google.com/translate_tts";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Maximum characters per synthesized chunk.
const MAX_CHUNK_CHARS: usize = 180;

/// Speech synthesizer backed by the free Google Translate TTS endpoint.
#[derive(Clone, Default)]
pub struct GoogleSpeechClient {
    client: Client,
}

impl GoogleSpeechClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    async fn fetch_chunk(&self, chunk: &str, lang: &str) -> Result<Vec<u8>, SpeechError> {
        let response = self
            .client
            .get(BASE_URL)
            .timeout(REQUEST_TIMEOUT)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", lang),
                ("q", chunk),
            ])
            .send()
            .await
            .map_err(|err| SpeechError::Request(err.to_string()))?;

        if !response.status().is_success() {
            return Err(SpeechError::Backend {
                status_code: Some(response.status().as_u16()),
                message: format!("speech endpoint answered {}", response.status()),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| SpeechError::Request(err.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleSpeechClient {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }

        let mut audio = Vec::new();
        for chunk in chunk_text(text, MAX_CHUNK_CHARS) {
            let bytes = self.fetch_chunk(&chunk, lang).await?;
            audio.extend_from_slice(&bytes);
        }
        Ok(audio)
    }
}

/// Splits text into chunks of at most `max_chars` characters, preferring
/// sentence boundaries and falling back to word boundaries.
fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate_len = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if candidate_len > max_chars && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);

        // Prefer breaking right after sentence-ending punctuation.
        if current.chars().count() > max_chars / 2
            && word.ends_with(['.', '!', '?'])
        {
            chunks.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
