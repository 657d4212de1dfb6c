//! Affect label types.

use serde::{Deserialize, Serialize};

/// Coarse four-way mood label derived from a sentiment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    Calm,
    Stressed,
    Sad,
}

impl Mood {
    /// Returns the lowercase label used in prompts and persisted records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Calm => "calm",
            Mood::Stressed => "stressed",
            Mood::Sad => "sad",
        }
    }

    /// Returns the display glyph for this mood.
    pub fn glyph(&self) -> &'static str {
        glyph_for(self.as_str())
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Finer five-way emotion label derived from the same sentiment score.
///
/// Emotion drives tone selection and content filtering; it is computed
/// independently of [`Mood`], not derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Joy,
    Content,
    Neutral,
    Anxiety,
    Anger,
}

impl Emotion {
    /// Returns the lowercase label used in prompts and persisted records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Content => "content",
            Emotion::Neutral => "neutral",
            Emotion::Anxiety => "anxiety",
            Emotion::Anger => "anger",
        }
    }

    /// Returns the display glyph for this emotion.
    pub fn glyph(&self) -> &'static str {
        glyph_for(self.as_str())
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display glyphs for mood and emotion labels.
const GLYPH_TABLE: &[(&str, &str)] = &[
    ("happy", "🙂"),
    ("calm", "😌"),
    ("stressed", "😟"),
    ("sad", "😢"),
    ("joy", "😁"),
    ("content", "😊"),
    ("neutral", "😐"),
    ("anxiety", "😰"),
    ("anger", "😠"),
];

/// Maps a mood or emotion label to a display glyph.
///
/// Unrecognized labels fall back to a generic glyph.
pub fn glyph_for(label: &str) -> &'static str {
    GLYPH_TABLE
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, glyph)| *glyph)
        .unwrap_or("🧠")
}

/// A single mood observation, appended once per interaction.
///
/// Samples are stored in insertion order; only a bounded window (the last
/// five) is summarized back into subsequent prompts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodSample {
    pub mood: Mood,
    pub emotion: Emotion,
    /// Timestamp when the sample was recorded (ISO 8601 format).
    pub timestamp: String,
}
