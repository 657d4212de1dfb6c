//! Mood and emotion classification.
//!
//! Free text is scored into a compound sentiment value in `[-1, 1]` and
//! mapped onto two independent label ladders: a coarse four-way mood used
//! for lightweight display, and a finer five-way emotion that drives tone
//! selection and resource filtering.

mod classifier;
mod lexicon;
mod model;

pub use classifier::{MoodClassifier, emotion_for, mood_for};
pub use lexicon::{LexiconScorer, SentimentScorer};
pub use model::{Emotion, Mood, MoodSample, glyph_for};
