//! Prompt assembly.
//!
//! The prompt has a fixed section order so identical inputs always
//! produce identical prompts: system line, tone instruction, session
//! summary, mood summary, conversation context, user framing, prior
//! suggestions, distress notice, habits summary, daily tip, exercises,
//! resources, closing instruction.

use solace_core::affect::MoodSample;
use solace_core::content::ResourceLink;
use solace_core::session::SessionSummary;

const SYSTEM_LINE: &str = "You are a kind and supportive mental wellness AI assistant.";
const CLOSING_LINE: &str = "Respond empathetically, provide guidance, suggest follow-up \
exercises, and keep responses concise and supportive.";

/// Number of recent session summaries echoed into the prompt.
const SUMMARY_WINDOW: usize = 3;

/// All inputs to one prompt, assembled by the use case.
pub struct PromptBuilder {
    pub tone_instruction: String,
    pub session_summaries: Vec<SessionSummary>,
    pub mood_history: Vec<MoodSample>,
    pub context: String,
    pub user_intro: String,
    pub previous_suggestions: Vec<String>,
    pub distress_notice: Option<&'static str>,
    pub habits_summary: String,
    pub daily_tip: String,
    pub exercises: Vec<String>,
    pub resources: Vec<ResourceLink>,
}

impl PromptBuilder {
    /// Renders the prompt with the fixed section order.
    pub fn render(&self) -> String {
        let mut prompt = String::new();
        prompt.push_str(SYSTEM_LINE);
        prompt.push('\n');
        prompt.push_str(&self.tone_instruction);
        prompt.push('\n');

        prompt.push_str("Session summary: ");
        prompt.push_str(&self.render_session_summaries());
        prompt.push('\n');

        prompt.push_str("Mood history: ");
        prompt.push_str(&self.render_mood_summary());
        prompt.push('\n');

        prompt.push_str("Conversation context:\n");
        prompt.push_str(&self.context);
        prompt.push('\n');

        prompt.push_str(&self.user_intro);
        prompt.push('\n');

        if !self.previous_suggestions.is_empty() {
            prompt.push_str("Previous AI suggestions: ");
            prompt.push_str(&self.previous_suggestions.join("; "));
            prompt.push('\n');
        }

        if let Some(notice) = self.distress_notice {
            prompt.push_str(notice);
            prompt.push('\n');
        }

        prompt.push_str("User habits summary: ");
        prompt.push_str(&self.habits_summary);
        prompt.push('\n');

        prompt.push_str("Daily wellness tip: ");
        prompt.push_str(&self.daily_tip);
        prompt.push('\n');

        prompt.push_str("Guided exercises: ");
        prompt.push_str(&self.exercises.join("; "));
        prompt.push('\n');

        prompt.push_str("Resources: ");
        let resources = self
            .resources
            .iter()
            .map(|link| format!("{} ({})", link.title, link.url))
            .collect::<Vec<_>>()
            .join("; ");
        prompt.push_str(&resources);
        prompt.push('\n');

        prompt.push_str(CLOSING_LINE);
        prompt
    }

    fn render_session_summaries(&self) -> String {
        let start = self.session_summaries.len().saturating_sub(SUMMARY_WINDOW);
        self.session_summaries[start..]
            .iter()
            .map(|summary| summary.text.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn render_mood_summary(&self) -> String {
        if self.mood_history.is_empty() {
            return String::new();
        }
        let rendered = self
            .mood_history
            .iter()
            .map(|sample| format!("{} ({})", sample.mood, sample.emotion))
            .collect::<Vec<_>>()
            .join(", ");
        format!("Your recent mood history: {rendered}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solace_core::affect::{Emotion, Mood};
    use solace_core::text::DISTRESS_NOTICE;

    fn minimal_builder() -> PromptBuilder {
        PromptBuilder {
            tone_instruction: "Your tone should be neutral and balanced.".to_string(),
            session_summaries: Vec::new(),
            mood_history: Vec::new(),
            context: "User: hello\n".to_string(),
            user_intro: "User stated: hello".to_string(),
            previous_suggestions: Vec::new(),
            distress_notice: None,
            habits_summary: "User is new to wellness tracking.".to_string(),
            daily_tip: "Drink water.".to_string(),
            exercises: vec!["Box breathing.".to_string()],
            resources: vec![ResourceLink {
                title: "Mindfulness".to_string(),
                url: "https://example.org/m".to_string(),
            }],
        }
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let mut builder = minimal_builder();
        builder.previous_suggestions = vec!["try journaling".to_string()];
        builder.distress_notice = Some(DISTRESS_NOTICE);
        let prompt = builder.render();

        let positions: Vec<usize> = [
            "You are a kind and supportive mental wellness AI assistant.",
            "Your tone should be",
            "Session summary:",
            "Mood history:",
            "Conversation context:",
            "User stated:",
            "Previous AI suggestions:",
            "⚠️ It sounds like you're in severe distress.",
            "User habits summary:",
            "Daily wellness tip:",
            "Guided exercises:",
            "Resources:",
            "Respond empathetically",
        ]
        .iter()
        .map(|needle| prompt.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
        .collect();

        for pair in positions.windows(2) {
            assert!(pair[0] < pair[1], "sections out of order");
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let builder = minimal_builder();
        assert_eq!(builder.render(), builder.render());
    }

    #[test]
    fn empty_suggestions_and_distress_are_omitted() {
        let prompt = minimal_builder().render();
        assert!(!prompt.contains("Previous AI suggestions:"));
        assert!(!prompt.contains("severe distress"));
    }

    #[test]
    fn mood_summary_renders_labels() {
        let mut builder = minimal_builder();
        builder.mood_history = vec![MoodSample {
            mood: Mood::Happy,
            emotion: Emotion::Joy,
            timestamp: "2024-01-01T00:00:00Z".to_string(),
        }];
        let prompt = builder.render();
        assert!(prompt.contains("Your recent mood history: happy (joy)"));
    }

    #[test]
    fn session_summaries_are_bounded() {
        let mut builder = minimal_builder();
        builder.session_summaries = (0..5)
            .map(|i| SessionSummary {
                text: format!("summary {i}"),
                timestamp: "2024-01-01T00:00:00Z".to_string(),
            })
            .collect();
        let prompt = builder.render();
        assert!(!prompt.contains("summary 0"));
        assert!(!prompt.contains("summary 1"));
        assert!(prompt.contains("summary 2"));
        assert!(prompt.contains("summary 4"));
    }

    #[test]
    fn distress_notice_is_verbatim() {
        let mut builder = minimal_builder();
        builder.distress_notice = Some(DISTRESS_NOTICE);
        let prompt = builder.render();
        assert!(prompt.contains("🇮🇳 India: 9152987821 (Vandrevala Foundation)"));
        assert!(prompt.contains("🇺🇸 USA: 988 (Suicide & Crisis Lifeline)"));
        assert!(prompt.contains("🇬🇧 UK: 116 123 (Samaritans)"));
    }
}
