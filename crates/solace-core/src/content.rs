//! Configuration collaborator traits for wellness content.
//!
//! Daily tips, guided exercises, and resource links come from local
//! content packs keyed by emotion and filtered by profile tone. Missing
//! or broken packs degrade to a fallback tip or empty lists; nothing in
//! this seam is fatal.

use serde::{Deserialize, Serialize};

use crate::affect::Emotion;
use crate::profile::Profile;

/// Tip shown when the tip pack is missing, empty, or unreadable.
pub const FALLBACK_TIP: &str = "Remember to take a deep breath and smile 🙂.";

/// An external resource suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    pub title: String,
    pub url: String,
}

/// Source of daily tips, guided exercises, and resource links.
///
/// Implementations are tone-aware; language adaptation is the caller's
/// concern (it owns the translation collaborator).
pub trait ContentSource: Send + Sync {
    /// Picks a daily tip, honoring the profile's tone preference when the
    /// pack tags tips with tones. Falls back to [`FALLBACK_TIP`].
    fn daily_tip(&self, profile: &Profile) -> String;

    /// Guided exercises for the given emotion, possibly augmented by the
    /// profile tone. Empty when nothing applies.
    fn guided_exercises(&self, emotion: Emotion, profile: &Profile) -> Vec<String>;

    /// Resource links for the given emotion, possibly augmented by the
    /// profile tone. Empty when nothing applies.
    fn resources(&self, emotion: Emotion, profile: &Profile) -> Vec<ResourceLink>;
}
