//! Profile domain model.
//!
//! One profile per user identity, mutable through read-modify-write on
//! save. Preferences are an explicit typed struct with documented
//! defaults rather than an open-ended map.

use serde::{Deserialize, Serialize};

/// Habits summary assigned to users who have not described any habits yet.
pub const DEFAULT_HABITS_SUMMARY: &str = "User is new to wellness tracking.";

/// Stylistic tone the assistant should adopt for a user.
///
/// `Neutral` means "no explicit preference"; the tone is then derived from
/// the detected emotion instead. Any other value is injected into the
/// prompt verbatim via [`TonePreference::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TonePreference {
    #[default]
    Neutral,
    Encouraging,
    Supportive,
    Gentle,
    Direct,
}

impl TonePreference {
    /// Returns the lowercase label used in prompts and persisted records.
    pub fn as_str(&self) -> &'static str {
        match self {
            TonePreference::Neutral => "neutral",
            TonePreference::Encouraging => "encouraging",
            TonePreference::Supportive => "supportive",
            TonePreference::Gentle => "gentle",
            TonePreference::Direct => "direct",
        }
    }

    /// Parses a label, falling back to `Neutral` for unknown values.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "encouraging" => TonePreference::Encouraging,
            "supportive" => TonePreference::Supportive,
            "gentle" => TonePreference::Gentle,
            "direct" => TonePreference::Direct,
            _ => TonePreference::Neutral,
        }
    }
}

impl std::fmt::Display for TonePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-user preferences with typed fields.
///
/// Defaults: language "English", tone [`TonePreference::Neutral`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Preferred language name (e.g. "English", "Hindi"); resolved to a
    /// language code through the language table.
    pub language: String,
    /// Preferred assistant tone.
    #[serde(default)]
    pub tone: TonePreference,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: "English".to_string(),
            tone: TonePreference::Neutral,
        }
    }
}

/// User profile domain model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name; defaults to the user id.
    pub name: String,
    /// Age in years; 0 means "not provided".
    #[serde(default)]
    pub age: u32,
    /// Free-text summary of the user's wellness habits.
    #[serde(default)]
    pub habits_summary: String,
    /// Typed preference fields.
    ///
    /// Kept last so TOML serialization emits scalar fields before the
    /// preferences table.
    #[serde(default)]
    pub preferences: Preferences,
}

impl Profile {
    /// Creates the default profile for a new user identity.
    pub fn for_user(user_id: &str) -> Self {
        Self {
            name: user_id.to_string(),
            age: 0,
            preferences: Preferences::default(),
            habits_summary: DEFAULT_HABITS_SUMMARY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_for_new_user() {
        let profile = Profile::for_user("ananya");
        assert_eq!(profile.name, "ananya");
        assert_eq!(profile.preferences.language, "English");
        assert_eq!(profile.preferences.tone, TonePreference::Neutral);
        assert_eq!(profile.habits_summary, DEFAULT_HABITS_SUMMARY);
    }

    #[test]
    fn tone_parse_round_trips() {
        for tone in [
            TonePreference::Neutral,
            TonePreference::Encouraging,
            TonePreference::Supportive,
            TonePreference::Gentle,
            TonePreference::Direct,
        ] {
            assert_eq!(TonePreference::parse(tone.as_str()), tone);
        }
    }

    #[test]
    fn unknown_tone_falls_back_to_neutral() {
        assert_eq!(TonePreference::parse("sarcastic"), TonePreference::Neutral);
    }
}
