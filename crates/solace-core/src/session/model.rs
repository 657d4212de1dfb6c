//! Conversation turn types.
//!
//! A turn is immutable once logged; the per-user conversation is an
//! ordered, append-only sequence of turns.

use serde::{Deserialize, Serialize};

use crate::affect::{Emotion, Mood};

/// Represents the role of a turn in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the AI assistant.
    Assistant,
}

impl MessageRole {
    /// Returns the prefix used when rendering conversation context.
    pub fn context_prefix(&self) -> &'static str {
        match self {
            MessageRole::User => "User",
            MessageRole::Assistant => "AI",
        }
    }

    /// Returns the label used in audio artifact names.
    pub fn audio_label(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "ai",
        }
    }
}

/// A single turn in a conversation history.
///
/// Mood/emotion annotations are computed once at logging time and treated
/// as immutable afterwards; assistant turns may carry a reference to a
/// synthesized audio artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// The role of the turn's author.
    pub role: MessageRole,
    /// The text content of the turn.
    pub text: String,
    /// Timestamp when the turn was created (ISO 8601 format).
    pub timestamp: String,
    /// Mood annotation, if the turn was classified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    /// Emotion annotation, if the turn was classified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<Emotion>,
    /// Display glyph for the annotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyph: Option<String>,
    /// Path to the synthesized audio artifact, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_path: Option<String>,
}

impl Turn {
    /// Creates an unannotated turn with the given role and text.
    pub fn new(role: MessageRole, text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: timestamp.into(),
            mood: None,
            emotion: None,
            glyph: None,
            audio_path: None,
        }
    }

    /// Attaches mood/emotion annotations and the matching glyph.
    pub fn with_affect(mut self, mood: Mood, emotion: Emotion) -> Self {
        self.glyph = Some(emotion.glyph().to_string());
        self.mood = Some(mood);
        self.emotion = Some(emotion);
        self
    }

    /// Attaches an audio artifact reference.
    pub fn with_audio(mut self, path: impl Into<String>) -> Self {
        self.audio_path = Some(path.into());
        self
    }
}

/// An on-demand session summary, append-only per user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// The summary text.
    pub text: String,
    /// Timestamp when the summary was produced (ISO 8601 format).
    pub timestamp: String,
}
