//! Threshold ladders mapping a compound sentiment score to labels.

use std::sync::Arc;

use super::lexicon::{LexiconScorer, SentimentScorer};
use super::model::{Emotion, Mood};

/// Maps a compound score to a coarse mood label.
///
/// The ladder is total: every score in `[-1, 1]` lands in exactly one cell.
pub fn mood_for(score: f64) -> Mood {
    if score >= 0.5 {
        Mood::Happy
    } else if score <= -0.5 {
        Mood::Sad
    } else if score > 0.0 {
        Mood::Calm
    } else {
        Mood::Stressed
    }
}

/// Maps a compound score to a finer emotion label.
///
/// Runs on the same score as [`mood_for`] but the two ladders are
/// independent; neither is derived from the other.
pub fn emotion_for(score: f64) -> Emotion {
    if score >= 0.6 {
        Emotion::Joy
    } else if score >= 0.2 {
        Emotion::Content
    } else if score > -0.2 {
        Emotion::Neutral
    } else if score > -0.6 {
        Emotion::Anxiety
    } else {
        Emotion::Anger
    }
}

/// Classifies free text into a (mood, emotion) pair.
///
/// The classifier never fails: any string input, including the empty
/// string, yields a label pair. Blank input is treated as neutral rather
/// than being scored.
pub struct MoodClassifier {
    scorer: Arc<dyn SentimentScorer>,
}

impl MoodClassifier {
    /// Creates a classifier over the given sentiment scorer.
    pub fn new(scorer: Arc<dyn SentimentScorer>) -> Self {
        Self { scorer }
    }

    /// Creates a classifier backed by the bundled lexicon scorer.
    pub fn with_lexicon() -> Self {
        Self::new(Arc::new(LexiconScorer::new()))
    }

    /// Classifies `text` into a (mood, emotion) pair.
    pub fn classify(&self, text: &str) -> (Mood, Emotion) {
        if text.trim().is_empty() {
            return (Mood::Calm, Emotion::Neutral);
        }
        let score = self.scorer.score(text);
        (mood_for(score), emotion_for(score))
    }
}
