//! The wellness interaction use case.
//!
//! `WellnessUseCase` stitches one interaction together: classify the
//! input, record the mood sample, gather auxiliary context, assemble the
//! prompt, call the generative backend, and post-process the reply. Every
//! remote failure degrades to a defined output; nothing here is fatal.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;

use solace_core::affect::{Emotion, Mood, MoodClassifier};
use solace_core::content::ContentSource;
use solace_core::goal::GoalProgress;
use solace_core::language;
use solace_core::profile::Profile;
use solace_core::record::UserRecord;
use solace_core::repository::WellnessRepository;
use solace_core::services::{TextGenerator, Translator};
use solace_core::session::Turn;
use solace_core::text::{DISTRESS_NOTICE, contains_distress_signal, is_question, strip_markdown};

use crate::context::build_context;
use crate::prompt::PromptBuilder;
use crate::tone::tone_instruction;

/// Number of recent mood samples summarized into the prompt.
const MOOD_WINDOW: usize = 5;

/// Pseudo-input used for on-demand session summarization.
const SUMMARY_REQUEST: &str = "Please provide a concise session summary and mood trend.";

/// Inputs to one interaction.
#[derive(Debug, Clone)]
pub struct RespondRequest {
    /// The raw user input.
    pub input: String,
    /// Session conversation history, oldest first.
    pub history: Vec<Turn>,
    /// Prior assistant suggestions recapped into the prompt.
    pub previous_suggestions: Vec<String>,
    /// Target language code for the reply.
    pub target_lang: String,
    /// Habits summary as the caller knows it.
    pub habits_summary: String,
    /// The user identity.
    pub user_id: String,
    /// Profile override; fetched from the repository when absent.
    pub profile: Option<Profile>,
}

/// Structured result of one interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct WellnessReply {
    /// Display text, translated to the target language.
    pub text: String,
    /// Speech-safe variant with markdown stripped.
    pub speech_text: String,
    /// Mood computed from the input (not from the reply).
    pub mood: Mood,
    /// Emotion computed from the input (not from the reply).
    pub emotion: Emotion,
    /// Timestamp of the interaction (ISO 8601 format).
    pub timestamp: String,
}

/// Orchestrates classifier, persistence, content, and remote services.
///
/// All handles are constructed once at process start and shared by
/// reference; the use case itself is stateless per call.
pub struct WellnessUseCase {
    repository: Arc<dyn WellnessRepository>,
    generator: Arc<dyn TextGenerator>,
    translator: Arc<dyn Translator>,
    content: Arc<dyn ContentSource>,
    classifier: MoodClassifier,
}

impl WellnessUseCase {
    /// Creates a new use case over the given collaborators.
    pub fn new(
        repository: Arc<dyn WellnessRepository>,
        generator: Arc<dyn TextGenerator>,
        translator: Arc<dyn Translator>,
        content: Arc<dyn ContentSource>,
        classifier: MoodClassifier,
    ) -> Self {
        Self {
            repository,
            generator,
            translator,
            content,
            classifier,
        }
    }

    /// Runs one interaction and returns the structured reply.
    ///
    /// The mood sample for the input is appended unconditionally, the
    /// summarization pseudo-turn included. A generation failure (or
    /// timeout) becomes a literal error-text reply with the emotion and
    /// timestamp still populated.
    pub async fn respond(&self, request: RespondRequest) -> WellnessReply {
        let context = build_context(&request.history);
        let (mood, emotion) = self.classifier.classify(&request.input);

        if let Err(e) = self
            .repository
            .append_mood(&request.user_id, mood, emotion)
            .await
        {
            tracing::warn!("Failed to record mood for '{}': {}", request.user_id, e);
        }

        // Fetched after the mood append so the summary window includes
        // this turn's sample.
        let record = self.load_record(&request.user_id).await;
        let profile = request.profile.clone().unwrap_or_else(|| record.profile.clone());
        let profile_lang = language::language_code(&profile.preferences.language);

        let daily_tip = self
            .localized(self.content.daily_tip(&profile), profile_lang)
            .await;
        let mut exercises = Vec::new();
        for exercise in self.content.guided_exercises(emotion, &profile) {
            exercises.push(self.localized(exercise, profile_lang).await);
        }
        let mut resources = self.content.resources(emotion, &profile);
        for link in &mut resources {
            link.title = self.localized(link.title.clone(), profile_lang).await;
        }

        let user_intro = if is_question(&request.input) {
            format!("User asked a question: {}", request.input)
        } else {
            format!("User stated: {}", request.input)
        };

        let distress_notice = contains_distress_signal(&request.input).then_some(DISTRESS_NOTICE);

        let prompt = PromptBuilder {
            tone_instruction: tone_instruction(emotion, &profile),
            session_summaries: record.session_summaries.clone(),
            mood_history: record.recent_moods(MOOD_WINDOW).to_vec(),
            context,
            user_intro,
            previous_suggestions: request.previous_suggestions.clone(),
            distress_notice,
            habits_summary: request.habits_summary.clone(),
            daily_tip,
            exercises,
            resources,
        }
        .render();

        let timestamp = Utc::now().to_rfc3339();

        match self.generator.generate(&prompt).await {
            Ok(raw) => {
                let display = raw.trim().to_string();
                let translated = self
                    .translate_or_passthrough(&display, &request.target_lang)
                    .await;
                let speech_text = strip_markdown(&translated);
                WellnessReply {
                    text: translated,
                    speech_text,
                    mood,
                    emotion,
                    timestamp,
                }
            }
            Err(e) => {
                tracing::warn!("Generation failed for '{}': {}", request.user_id, e);
                let err_text = format!("⚠️ Error contacting Gemini API: {e}");
                WellnessReply {
                    speech_text: strip_markdown(&err_text),
                    text: err_text,
                    mood,
                    emotion,
                    timestamp,
                }
            }
        }
    }

    /// Runs the summarization pseudo-turn and logs the resulting summary.
    pub async fn summarize_session(&self, mut request: RespondRequest) -> WellnessReply {
        request.input = SUMMARY_REQUEST.to_string();
        let reply = self.respond(request.clone()).await;

        if let Err(e) = self
            .repository
            .append_summary(&request.user_id, &reply.text)
            .await
        {
            tracing::warn!("Failed to log summary for '{}': {}", request.user_id, e);
        }

        reply
    }

    /// Persists conversation turns; the caller owns turn logging.
    pub async fn log_turns(&self, user_id: &str, turns: &[Turn]) -> Result<()> {
        self.repository.append_turns(user_id, turns).await
    }

    /// Loads the user's record (defaults for a new user).
    pub async fn record(&self, user_id: &str) -> UserRecord {
        self.load_record(user_id).await
    }

    /// Creates the user record if it doesn't exist yet.
    pub async fn create_user(&self, user_id: &str) -> Result<()> {
        self.repository.create_user(user_id).await
    }

    /// Lists known user ids, most recently active first.
    pub async fn list_users(&self) -> Result<Vec<String>> {
        self.repository.list_user_ids().await
    }

    /// Saves the user's profile.
    pub async fn save_profile(&self, user_id: &str, profile: &Profile) -> Result<()> {
        self.repository.set_profile(user_id, profile).await
    }

    /// Updates the user's habits summary.
    pub async fn save_habits(&self, user_id: &str, habits_text: &str) -> Result<()> {
        self.repository.set_habits(user_id, habits_text).await
    }

    /// Adds a goal and returns its id.
    pub async fn add_goal(&self, user_id: &str, goal_text: &str) -> Result<String> {
        self.repository.add_goal(user_id, goal_text).await
    }

    /// Picks a daily tip for the given profile.
    pub fn daily_tip(&self, profile: &Profile) -> String {
        self.content.daily_tip(profile)
    }

    /// Updates goal progress; false when the goal id is unknown.
    pub async fn update_goal_progress(
        &self,
        user_id: &str,
        goal_id: &str,
        progress: GoalProgress,
    ) -> Result<bool> {
        self.repository
            .update_goal_progress(user_id, goal_id, progress)
            .await
    }

    async fn load_record(&self, user_id: &str) -> UserRecord {
        match self.repository.find_record(user_id).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Failed to load record for '{}': {}", user_id, e);
                UserRecord::empty(user_id)
            }
        }
    }

    /// Translates prompt content into the profile language, passing it
    /// through unchanged when the language is the base one.
    async fn localized(&self, text: String, lang: &str) -> String {
        if language::is_base_language(lang) {
            return text;
        }
        self.translate_or_passthrough(&text, lang).await
    }

    /// The degraded value for a failed translation is the input itself.
    async fn translate_or_passthrough(&self, text: &str, lang: &str) -> String {
        match self.translator.translate(text, lang).await {
            Ok(translated) => translated,
            Err(e) => {
                tracing::warn!("Translation to '{}' failed ({}); passing through", lang, e);
                text.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use solace_core::content::ResourceLink;
    use solace_core::profile::TonePreference;
    use solace_core::services::{GenerationError, TranslationError};
    use solace_core::session::MessageRole;
    use std::sync::Mutex;

    // Mock repository capturing appended moods and summaries.
    #[derive(Default)]
    struct MockRepository {
        moods: Mutex<Vec<(Mood, Emotion)>>,
        summaries: Mutex<Vec<String>>,
        record: Mutex<Option<UserRecord>>,
    }

    #[async_trait]
    impl WellnessRepository for MockRepository {
        async fn find_record(&self, user_id: &str) -> Result<UserRecord> {
            Ok(self
                .record
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| UserRecord::empty(user_id)))
        }

        async fn append_turns(&self, _user_id: &str, _turns: &[Turn]) -> Result<()> {
            Ok(())
        }

        async fn append_mood(&self, _user_id: &str, mood: Mood, emotion: Emotion) -> Result<()> {
            self.moods.lock().unwrap().push((mood, emotion));
            Ok(())
        }

        async fn append_summary(&self, _user_id: &str, summary_text: &str) -> Result<()> {
            self.summaries.lock().unwrap().push(summary_text.to_string());
            Ok(())
        }

        async fn set_profile(&self, _user_id: &str, _profile: &Profile) -> Result<()> {
            Ok(())
        }

        async fn set_habits(&self, _user_id: &str, _habits_text: &str) -> Result<()> {
            Ok(())
        }

        async fn add_goal(&self, _user_id: &str, _goal_text: &str) -> Result<String> {
            Ok("goal-id".to_string())
        }

        async fn update_goal_progress(
            &self,
            _user_id: &str,
            _goal_id: &str,
            _progress: GoalProgress,
        ) -> Result<bool> {
            Ok(true)
        }

        async fn list_user_ids(&self) -> Result<Vec<String>> {
            Ok(vec![])
        }

        async fn create_user(&self, _user_id: &str) -> Result<()> {
            Ok(())
        }
    }

    // Generator that records the prompt it was given.
    #[derive(Default)]
    struct CapturingGenerator {
        prompt: Mutex<Option<String>>,
        reply: String,
    }

    impl CapturingGenerator {
        fn replying(reply: &str) -> Self {
            Self {
                prompt: Mutex::new(None),
                reply: reply.to_string(),
            }
        }

        fn last_prompt(&self) -> String {
            self.prompt.lock().unwrap().clone().unwrap()
        }
    }

    #[async_trait]
    impl TextGenerator for CapturingGenerator {
        async fn generate(&self, prompt: &str) -> std::result::Result<String, GenerationError> {
            *self.prompt.lock().unwrap() = Some(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> std::result::Result<String, GenerationError> {
            Err(GenerationError::Request {
                message: "connection reset".to_string(),
                is_timeout: false,
            })
        }
    }

    // Translator that brackets its input so application is observable.
    struct BracketingTranslator;

    #[async_trait]
    impl Translator for BracketingTranslator {
        async fn translate(
            &self,
            text: &str,
            target_lang: &str,
        ) -> std::result::Result<String, TranslationError> {
            if target_lang == "en" {
                return Ok(text.to_string());
            }
            Ok(format!("[{target_lang}] {text}"))
        }
    }

    struct FailingTranslator;

    #[async_trait]
    impl Translator for FailingTranslator {
        async fn translate(
            &self,
            _text: &str,
            _target_lang: &str,
        ) -> std::result::Result<String, TranslationError> {
            Err(TranslationError::Request("offline".to_string()))
        }
    }

    struct StaticContent;

    impl ContentSource for StaticContent {
        fn daily_tip(&self, _profile: &Profile) -> String {
            "Drink a glass of water.".to_string()
        }

        fn guided_exercises(&self, _emotion: Emotion, _profile: &Profile) -> Vec<String> {
            vec!["Box breathing.".to_string()]
        }

        fn resources(&self, _emotion: Emotion, _profile: &Profile) -> Vec<ResourceLink> {
            vec![ResourceLink {
                title: "Mindfulness basics".to_string(),
                url: "https://example.org/m".to_string(),
            }]
        }
    }

    fn usecase_with(
        repository: Arc<MockRepository>,
        generator: Arc<dyn TextGenerator>,
        translator: Arc<dyn Translator>,
    ) -> WellnessUseCase {
        WellnessUseCase::new(
            repository,
            generator,
            translator,
            Arc::new(StaticContent),
            MoodClassifier::with_lexicon(),
        )
    }

    fn request(input: &str) -> RespondRequest {
        RespondRequest {
            input: input.to_string(),
            history: Vec::new(),
            previous_suggestions: Vec::new(),
            target_lang: "en".to_string(),
            habits_summary: "User is new to wellness tracking.".to_string(),
            user_id: "maya".to_string(),
            profile: None,
        }
    }

    #[tokio::test]
    async fn joyful_input_gets_upbeat_tone() {
        let repository = Arc::new(MockRepository::default());
        let generator = Arc::new(CapturingGenerator::replying("Wonderful to hear!"));
        let usecase = usecase_with(
            repository.clone(),
            generator.clone(),
            Arc::new(BracketingTranslator),
        );

        let reply = usecase
            .respond(request("I am so happy today, life is great!"))
            .await;

        assert_eq!(reply.mood, Mood::Happy);
        assert_eq!(reply.emotion, Emotion::Joy);
        assert_eq!(reply.text, "Wonderful to hear!");

        let prompt = generator.last_prompt();
        assert!(prompt.contains("Your tone should be upbeat and encouraging."));
        assert!(prompt.contains("Daily wellness tip: Drink a glass of water."));
        assert_eq!(
            repository.moods.lock().unwrap().as_slice(),
            &[(Mood::Happy, Emotion::Joy)]
        );
    }

    #[tokio::test]
    async fn distress_input_prepends_crisis_notice() {
        let repository = Arc::new(MockRepository::default());
        let generator = Arc::new(CapturingGenerator::replying("Please stay safe."));
        let usecase = usecase_with(
            repository,
            generator.clone(),
            Arc::new(BracketingTranslator),
        );

        usecase.respond(request("I want to end my life")).await;

        let prompt = generator.last_prompt();
        assert!(prompt.contains("⚠️ It sounds like you're in severe distress."));
        assert!(prompt.contains("🇮🇳 India: 9152987821 (Vandrevala Foundation)"));
        assert!(prompt.contains("🇺🇸 USA: 988 (Suicide & Crisis Lifeline)"));
        assert!(prompt.contains("🇬🇧 UK: 116 123 (Samaritans)"));
    }

    #[tokio::test]
    async fn generation_failure_degrades_to_literal_error() {
        let repository = Arc::new(MockRepository::default());
        let usecase = usecase_with(
            repository,
            Arc::new(FailingGenerator),
            Arc::new(BracketingTranslator),
        );

        let reply = usecase
            .respond(request("I am so happy today, life is great!"))
            .await;

        assert!(reply.text.contains("⚠️ Error contacting Gemini API"));
        assert!(reply.speech_text.contains("⚠️ Error contacting Gemini API"));
        // Emotion reflects the input classification, not the error text.
        assert_eq!(reply.emotion, Emotion::Joy);
        assert!(!reply.timestamp.is_empty());
    }

    #[tokio::test]
    async fn question_inputs_are_framed_as_questions() {
        let repository = Arc::new(MockRepository::default());
        let generator = Arc::new(CapturingGenerator::replying("Try winding down earlier."));
        let usecase = usecase_with(
            repository,
            generator.clone(),
            Arc::new(BracketingTranslator),
        );

        usecase.respond(request("How can I sleep better?")).await;
        assert!(
            generator
                .last_prompt()
                .contains("User asked a question: How can I sleep better?")
        );

        usecase.respond(request("I slept well.")).await;
        assert!(generator.last_prompt().contains("User stated: I slept well."));
    }

    #[tokio::test]
    async fn explicit_profile_tone_wins() {
        let repository = Arc::new(MockRepository::default());
        let generator = Arc::new(CapturingGenerator::replying("ok"));
        let usecase = usecase_with(
            repository,
            generator.clone(),
            Arc::new(BracketingTranslator),
        );

        let mut profile = Profile::for_user("maya");
        profile.preferences.tone = TonePreference::Gentle;
        let mut req = request("I am so happy today, life is great!");
        req.profile = Some(profile);

        usecase.respond(req).await;
        assert!(
            generator
                .last_prompt()
                .contains("Your tone should be gentle.")
        );
    }

    #[tokio::test]
    async fn reply_is_translated_and_speech_safe() {
        let repository = Arc::new(MockRepository::default());
        let generator = Arc::new(CapturingGenerator::replying("**Breathe** slowly."));
        let usecase = usecase_with(
            repository,
            generator,
            Arc::new(BracketingTranslator),
        );

        let mut req = request("hello there friend");
        req.target_lang = "hi".to_string();
        let reply = usecase.respond(req).await;

        assert_eq!(reply.text, "[hi] **Breathe** slowly.");
        assert_eq!(reply.speech_text, "[hi] Breathe slowly.");
    }

    #[tokio::test]
    async fn failed_translation_passes_through() {
        let repository = Arc::new(MockRepository::default());
        let generator = Arc::new(CapturingGenerator::replying("Take a short walk."));
        let usecase = usecase_with(repository, generator, Arc::new(FailingTranslator));

        let mut req = request("hello there friend");
        req.target_lang = "hi".to_string();
        let reply = usecase.respond(req).await;

        assert_eq!(reply.text, "Take a short walk.");
    }

    #[tokio::test]
    async fn context_is_bounded_to_recent_turns() {
        let repository = Arc::new(MockRepository::default());
        let generator = Arc::new(CapturingGenerator::replying("ok"));
        let usecase = usecase_with(
            repository,
            generator.clone(),
            Arc::new(BracketingTranslator),
        );

        let mut req = request("feeling steady today");
        req.history = (0..7)
            .map(|i| {
                Turn::new(
                    MessageRole::User,
                    format!("turn {i}"),
                    "2024-01-01T00:00:00Z",
                )
            })
            .collect();

        usecase.respond(req).await;
        let prompt = generator.last_prompt();
        assert!(!prompt.contains("turn 0"));
        assert!(!prompt.contains("turn 1"));
        assert!(prompt.contains("turn 2"));
        assert!(prompt.contains("turn 6"));
    }

    #[tokio::test]
    async fn summarization_appends_summary_and_mood() {
        let repository = Arc::new(MockRepository::default());
        let generator = Arc::new(CapturingGenerator::replying("A calm, steady session."));
        let usecase = usecase_with(
            repository.clone(),
            generator.clone(),
            Arc::new(BracketingTranslator),
        );

        let reply = usecase.summarize_session(request("ignored")).await;

        assert_eq!(reply.text, "A calm, steady session.");
        assert_eq!(
            repository.summaries.lock().unwrap().as_slice(),
            &["A calm, steady session.".to_string()]
        );
        // The pseudo-turn records a mood sample like any other call.
        assert_eq!(repository.moods.lock().unwrap().len(), 1);
        assert!(
            generator
                .last_prompt()
                .contains("Please provide a concise session summary and mood trend.")
        );
    }

    #[tokio::test]
    async fn mood_window_is_bounded_to_five() {
        let repository = Arc::new(MockRepository::default());
        {
            let mut record = UserRecord::empty("maya");
            for _ in 0..6 {
                record.mood_history.push(solace_core::affect::MoodSample {
                    mood: Mood::Calm,
                    emotion: Emotion::Neutral,
                    timestamp: "2024-01-01T00:00:00Z".to_string(),
                });
            }
            *repository.record.lock().unwrap() = Some(record);
        }
        let generator = Arc::new(CapturingGenerator::replying("ok"));
        let usecase = usecase_with(
            repository,
            generator.clone(),
            Arc::new(BracketingTranslator),
        );

        usecase.respond(request("feeling steady today")).await;
        let prompt = generator.last_prompt();
        assert!(prompt.contains("Your recent mood history:"));
        // Five samples rendered, comma-separated.
        let rendered = prompt
            .lines()
            .find(|line| line.starts_with("Mood history:"))
            .unwrap();
        assert_eq!(rendered.matches('(').count(), 5);
    }
}
