//! Tone instruction resolution.

use solace_core::affect::Emotion;
use solace_core::profile::{Profile, TonePreference};

/// Resolves the tone instruction injected into the prompt.
///
/// An explicit non-neutral profile tone wins verbatim; otherwise the tone
/// derives from the detected emotion label.
pub fn tone_instruction(emotion: Emotion, profile: &Profile) -> String {
    let tone = profile.preferences.tone;
    if tone != TonePreference::Neutral {
        return format!("Your tone should be {}.", tone.as_str());
    }

    // The classifier never emits "sadness" (sad inputs land on anxiety or
    // anger); the arm covers externally supplied labels.
    match emotion.as_str() {
        "joy" => "Your tone should be upbeat and encouraging.".to_string(),
        "sadness" => "Your tone should be gentle, supportive, and empathetic.".to_string(),
        "anger" => "Your tone should be calm, understanding, and soothing.".to_string(),
        _ => "Your tone should be neutral and balanced.".to_string(),
    }
}
