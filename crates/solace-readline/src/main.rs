use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as AnyhowContext, Result};
use chrono::Utc;
use colored::Colorize;
use rustyline::Editor;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use tokio::time::timeout;

use solace_application::{RespondRequest, WellnessReply, WellnessUseCase};
use solace_core::affect::{Emotion, Mood, MoodClassifier};
use solace_core::goal::GoalProgress;
use solace_core::language;
use solace_core::profile::{Profile, TonePreference};
use solace_core::session::{MessageRole, Turn};
use solace_core::text::strip_markdown;
use solace_interaction::{
    GeminiTextClient, GoogleSpeechClient, GoogleTranslateClient, SpeechService,
};

/// Ceiling for one whole interaction; remote clients carry their own
/// per-request timeouts below this.
const INTERACTION_TIMEOUT: Duration = Duration::from_secs(60);

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: vec![
                "/user".to_string(),
                "/users".to_string(),
                "/profile".to_string(),
                "/tone".to_string(),
                "/language".to_string(),
                "/habits".to_string(),
                "/goal".to_string(),
                "/goals".to_string(),
                "/progress".to_string(),
                "/mood".to_string(),
                "/summary".to_string(),
                "/tip".to_string(),
            ],
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Per-session state the REPL tracks for the active user.
struct SessionState {
    user_id: String,
    history: Vec<Turn>,
    previous_suggestions: Vec<String>,
    profile: Profile,
}

impl SessionState {
    async fn load(usecase: &WellnessUseCase, user_id: &str) -> Self {
        let record = usecase.record(user_id).await;
        Self {
            user_id: user_id.to_string(),
            previous_suggestions: record.assistant_suggestions(),
            history: record.conversation,
            profile: record.profile,
        }
    }

    fn respond_request(&self, input: &str) -> RespondRequest {
        RespondRequest {
            input: input.to_string(),
            history: self.history.clone(),
            previous_suggestions: self.previous_suggestions.clone(),
            target_lang: language::language_code(&self.profile.preferences.language).to_string(),
            habits_summary: self.profile.habits_summary.clone(),
            user_id: self.user_id.clone(),
            profile: Some(self.profile.clone()),
        }
    }
}

/// The main entry point for the Solace REPL.
///
/// Sets up a rustyline-based chat loop that:
/// 1. Constructs all collaborator handles once (repository, content packs,
///    Gemini client, translator, speech service)
/// 2. Provides command completion for the slash commands
/// 3. Runs one interaction at a time, bounded by an explicit timeout
/// 4. Persists turns after each interaction and renders colored output
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // ===== Backend Initialization =====
    let repository = Arc::new(
        solace_infrastructure::TomlWellnessRepository::default_location()
            .context("Failed to open the user record store")?,
    );
    let content = Arc::new(
        solace_infrastructure::TomlContentSource::default_location()
            .context("Failed to prepare content packs")?,
    );
    let generator = Arc::new(GeminiTextClient::try_from_config().await.map_err(|e| {
        anyhow::anyhow!("{e}\nAdd your Gemini API key to the secret.json file and retry.")
    })?);
    let translator = Arc::new(GoogleTranslateClient::new());
    let speech = SpeechService::default_location(Arc::new(GoogleSpeechClient::new()))
        .context("Failed to prepare the audio cache")?;

    let usecase = WellnessUseCase::new(
        repository,
        generator,
        translator,
        content,
        MoodClassifier::with_lexicon(),
    );

    let mut state = SessionState::load(&usecase, "default_user").await;
    usecase.create_user(&state.user_id).await?;

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl: Editor<CliHelper, rustyline::history::DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== Solace ===".bright_magenta().bold());
    println!(
        "{}",
        "Tell me how you're doing, or type '/goals', '/mood', '/summary'. 'quit' to exit."
            .bright_black()
    );
    println!();

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Take care of yourself. Goodbye!".bright_green());
                    break;
                }

                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                if trimmed.starts_with('/') {
                    if let Err(e) = handle_command(&usecase, &mut state, trimmed).await {
                        eprintln!("{}", format!("Error: {e}").red());
                    }
                    continue;
                }

                if let Err(e) = handle_chat(&usecase, &speech, &mut state, trimmed).await {
                    eprintln!("{}", format!("Error: {e}").red());
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

/// Runs one chat interaction sequentially: respond, render, speak, persist.
async fn handle_chat(
    usecase: &WellnessUseCase,
    speech: &SpeechService,
    state: &mut SessionState,
    input: &str,
) -> Result<()> {
    let request = state.respond_request(input);

    let reply = match timeout(INTERACTION_TIMEOUT, usecase.respond(request)).await {
        Ok(reply) => reply,
        Err(_) => timed_out_reply(),
    };

    let glyph = reply.emotion.glyph();
    println!("{}", format!("> {glyph} {input}").green());

    for line in reply.text.lines() {
        println!("{}", line.bright_blue());
    }

    let lang = language::language_code(&state.profile.preferences.language);
    let audio_path = speech
        .speak(&reply.speech_text, &state.user_id, MessageRole::Assistant, lang)
        .await;
    if let Some(path) = &audio_path {
        println!("{}", format!("[audio: {}]", path.display()).bright_black());
    }
    println!();

    // Persist the pair of turns; the mood sample was already recorded
    // inside the respond pipeline.
    let user_turn = Turn::new(MessageRole::User, input, Utc::now().to_rfc3339())
        .with_affect(reply.mood, reply.emotion);
    let mut ai_turn = Turn::new(MessageRole::Assistant, reply.text.clone(), reply.timestamp.clone());
    ai_turn.emotion = Some(reply.emotion);
    ai_turn.glyph = Some(reply.emotion.glyph().to_string());
    if let Some(path) = audio_path {
        ai_turn = ai_turn.with_audio(path.display().to_string());
    }
    usecase
        .log_turns(&state.user_id, &[user_turn.clone(), ai_turn.clone()])
        .await?;

    state.history.push(user_turn);
    state.history.push(ai_turn);
    state.previous_suggestions.push(reply.text);

    Ok(())
}

/// Degraded reply used when the interaction ceiling fires.
fn timed_out_reply() -> WellnessReply {
    let text = "⚠️ Error contacting Gemini API: the request timed out".to_string();
    WellnessReply {
        speech_text: strip_markdown(&text),
        text,
        mood: Mood::Calm,
        emotion: Emotion::Neutral,
        timestamp: Utc::now().to_rfc3339(),
    }
}

/// Dispatches a slash command.
async fn handle_command(
    usecase: &WellnessUseCase,
    state: &mut SessionState,
    line: &str,
) -> Result<()> {
    let (command, rest) = match line.split_once(' ') {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "/user" => {
            if rest.is_empty() {
                println!("{}", format!("Active profile: {}", state.user_id).cyan());
                return Ok(());
            }
            usecase.create_user(rest).await?;
            *state = SessionState::load(usecase, rest).await;
            println!("{}", format!("Switched to profile '{}'.", rest).green());
        }
        "/users" => {
            for user_id in usecase.list_users().await? {
                let marker = if user_id == state.user_id { "*" } else { " " };
                println!("{}", format!("{marker} {user_id}").cyan());
            }
        }
        "/profile" => {
            let p = &state.profile;
            println!("{}", format!("Name:     {}", p.name).cyan());
            println!("{}", format!("Age:      {}", p.age).cyan());
            println!(
                "{}",
                format!("Language: {}", p.preferences.language).cyan()
            );
            println!("{}", format!("Tone:     {}", p.preferences.tone).cyan());
            println!("{}", format!("Habits:   {}", p.habits_summary).cyan());
        }
        "/tone" => {
            if rest.is_empty() {
                println!(
                    "{}",
                    "Usage: /tone <neutral|encouraging|supportive|gentle|direct>".yellow()
                );
                return Ok(());
            }
            state.profile.preferences.tone = TonePreference::parse(rest);
            usecase.save_profile(&state.user_id, &state.profile).await?;
            println!(
                "{}",
                format!("Tone set to '{}'.", state.profile.preferences.tone).green()
            );
        }
        "/language" => {
            if rest.is_empty() {
                println!("{}", "Usage: /language <name>".yellow());
                return Ok(());
            }
            state.profile.preferences.language = rest.to_string();
            usecase.save_profile(&state.user_id, &state.profile).await?;
            println!(
                "{}",
                format!(
                    "Language set to '{}' ({}).",
                    rest,
                    language::language_code(rest)
                )
                .green()
            );
        }
        "/habits" => {
            if rest.is_empty() {
                println!("{}", "Usage: /habits <description>".yellow());
                return Ok(());
            }
            usecase.save_habits(&state.user_id, rest).await?;
            state.profile.habits_summary = rest.to_string();
            println!("{}", "Habits summary updated.".green());
        }
        "/goal" => {
            if rest.is_empty() {
                println!("{}", "Usage: /goal <text>".yellow());
                return Ok(());
            }
            let goal_id = usecase.add_goal(&state.user_id, rest).await?;
            println!("{}", format!("Goal added ({goal_id}).").green());
        }
        "/goals" => {
            let record = usecase.record(&state.user_id).await;
            if record.goals.is_empty() {
                println!("{}", "No goals yet. Add one with /goal <text>.".bright_black());
            }
            for goal in &record.goals {
                println!(
                    "{}",
                    format!("[{}] {} — {}", goal.progress, goal.text, goal.id).cyan()
                );
            }
        }
        "/progress" => {
            let Some((goal_id, progress_label)) = rest.split_once(' ') else {
                println!("{}", "Usage: /progress <goal-id> <state>".yellow());
                return Ok(());
            };
            let Some(progress) = GoalProgress::parse(progress_label) else {
                println!(
                    "{}",
                    "States: not started, started, in progress, completed".yellow()
                );
                return Ok(());
            };
            if usecase
                .update_goal_progress(&state.user_id, goal_id.trim(), progress)
                .await?
            {
                println!("{}", format!("Goal marked '{}'.", progress).green());
            } else {
                println!("{}", "No goal with that id.".yellow());
            }
        }
        "/mood" => {
            let record = usecase.record(&state.user_id).await;
            let recent = record.recent_moods(5);
            if recent.is_empty() {
                println!("{}", "No mood history yet.".bright_black());
            }
            for sample in recent {
                println!(
                    "{}",
                    format!(
                        "{} {} ({}) at {}",
                        sample.emotion.glyph(),
                        sample.mood,
                        sample.emotion,
                        sample.timestamp
                    )
                    .cyan()
                );
            }
        }
        "/summary" => {
            let request = state.respond_request("");
            let reply = match timeout(INTERACTION_TIMEOUT, usecase.summarize_session(request)).await
            {
                Ok(reply) => reply,
                Err(_) => timed_out_reply(),
            };
            for line in reply.text.lines() {
                println!("{}", line.bright_yellow());
            }
        }
        "/tip" => {
            println!("{}", usecase.daily_tip(&state.profile).bright_yellow());
        }
        _ => {
            println!("{}", "Unknown command".bright_black());
        }
    }

    Ok(())
}
