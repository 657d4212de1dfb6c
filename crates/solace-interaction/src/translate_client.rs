//! Translation client over the public Google Translate endpoint.
//!
//! Uses the unauthenticated `translate_a/single` endpoint. Translation is
//! the identity for the base language; callers degrade to pass-through on
//! any error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use solace_core::language;
use solace_core::services::{TranslationError, Translator};

const BASE_URL: &str = "https://translate.googleapis.com/translate_a/single";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Translator backed by the free Google Translate web endpoint.
#[derive(Clone, Default)]
pub struct GoogleTranslateClient {
    client: Client,
}

impl GoogleTranslateClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslateClient {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, TranslationError> {
        if text.trim().is_empty() || language::is_base_language(target_lang) {
            return Ok(text.to_string());
        }

        let response = self
            .client
            .get(BASE_URL)
            .timeout(REQUEST_TIMEOUT)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|err| TranslationError::Request(err.to_string()))?;

        if !response.status().is_success() {
            return Err(TranslationError::Request(format!(
                "translation endpoint answered {}",
                response.status()
            )));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|err| TranslationError::Malformed(err.to_string()))?;

        join_segments(&value)
    }
}

/// The endpoint answers a nested array; the first element is a list of
/// `[translated, original, ...]` segments.
fn join_segments(value: &Value) -> Result<String, TranslationError> {
    let segments = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslationError::Malformed("missing segment list".to_string()))?;

    let mut translated = String::new();
    for segment in segments {
        if let Some(piece) = segment.get(0).and_then(Value::as_str) {
            translated.push_str(piece);
        }
    }

    if translated.is_empty() {
        return Err(TranslationError::Malformed(
            "no translated segments".to_string(),
        ));
    }

    Ok(translated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn base_language_is_identity() {
        let client = GoogleTranslateClient::new();
        let text = "Take a deep breath.";
        assert_eq!(client.translate(text, "en").await.unwrap(), text);
    }

    #[tokio::test]
    async fn empty_text_is_identity() {
        let client = GoogleTranslateClient::new();
        assert_eq!(client.translate("", "hi").await.unwrap(), "");
    }

    #[test]
    fn joins_response_segments() {
        let raw = r#"[[["Hallo ","Hello ",null],["Welt","world",null]],null,"en"]"#;
        let value: Value = serde_json::from_str(raw).unwrap();
        assert_eq!(join_segments(&value).unwrap(), "Hallo Welt");
    }

    #[test]
    fn malformed_response_is_an_error() {
        let value: Value = serde_json::from_str(r#"{"unexpected": true}"#).unwrap();
        assert!(join_segments(&value).is_err());
    }
}
