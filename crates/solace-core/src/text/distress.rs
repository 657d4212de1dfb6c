//! Distress keyword detection and the crisis-resource notice.

/// Phrases that trigger the crisis-resource notice.
const DISTRESS_KEYWORDS: &[&str] = &[
    "suicidal",
    "hopeless",
    "can't go on",
    "end my life",
    "worthless",
];

/// The fixed crisis-resource notice prepended to the prompt when a
/// distress keyword is detected. The hotline lines are literal and must
/// not be reworded.
pub const DISTRESS_NOTICE: &str = "⚠️ It sounds like you're in severe distress. \
Please consider calling a local helpline:\n\
🇮🇳 India: 9152987821 (Vandrevala Foundation)\n\
🇺🇸 USA: 988 (Suicide & Crisis Lifeline)\n\
🇬🇧 UK: 116 123 (Samaritans)\n\
Reach out to a friend, family member, or professional.";

/// Case-insensitive substring scan against the distress keyword list.
pub fn contains_distress_signal(text: &str) -> bool {
    let lowered = text.to_lowercase();
    DISTRESS_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}
