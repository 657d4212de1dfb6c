//! TOML-backed wellness content packs.
//!
//! Two files under the config directory feed the prompt: `daily_tips.toml`
//! (tips with optional tone tags) and `resources.toml` (per-emotion
//! guided exercises and resource links). Missing or unreadable packs
//! degrade to the fallback tip or empty lists.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use serde::Deserialize;

use solace_core::affect::Emotion;
use solace_core::content::{ContentSource, FALLBACK_TIP, ResourceLink};
use solace_core::error::Result;
use solace_core::profile::{Profile, TonePreference};

use crate::paths::SolacePaths;

#[derive(Debug, Deserialize)]
struct TipsFile {
    #[serde(default, rename = "tip")]
    tips: Vec<TipEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct TipEntry {
    tip: String,
    #[serde(default)]
    tone: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResourcesFile {
    #[serde(default)]
    emotions: HashMap<String, EmotionContent>,
}

#[derive(Debug, Deserialize, Default)]
struct EmotionContent {
    #[serde(default)]
    exercises: Vec<String>,
    #[serde(default, rename = "link")]
    links: Vec<LinkEntry>,
}

#[derive(Debug, Deserialize)]
struct LinkEntry {
    title: String,
    url: String,
}

/// Content source reading TOML packs from disk on each call.
pub struct TomlContentSource {
    tips_path: PathBuf,
    resources_path: PathBuf,
}

impl TomlContentSource {
    /// Creates a source over explicit pack paths.
    pub fn new(tips_path: impl Into<PathBuf>, resources_path: impl Into<PathBuf>) -> Self {
        Self {
            tips_path: tips_path.into(),
            resources_path: resources_path.into(),
        }
    }

    /// Creates a source over the default config locations, writing
    /// starter packs if none exist yet.
    pub fn default_location() -> Result<Self> {
        let tips_path = SolacePaths::tips_file()
            .map_err(|e| solace_core::SolaceError::config(e.to_string()))?;
        let resources_path = SolacePaths::resources_file()
            .map_err(|e| solace_core::SolaceError::config(e.to_string()))?;
        ensure_content_file(&tips_path, STARTER_TIPS)?;
        ensure_content_file(&resources_path, STARTER_RESOURCES)?;
        Ok(Self::new(tips_path, resources_path))
    }

    fn load_tips(&self) -> Result<Vec<TipEntry>> {
        let content = fs::read_to_string(&self.tips_path)?;
        let file: TipsFile = toml::from_str(&content)?;
        Ok(file.tips)
    }

    fn load_emotion_content(&self, emotion: Emotion) -> Result<EmotionContent> {
        let content = fs::read_to_string(&self.resources_path)?;
        let mut file: ResourcesFile = toml::from_str(&content)?;
        Ok(file.emotions.remove(emotion.as_str()).unwrap_or_default())
    }
}

impl ContentSource for TomlContentSource {
    fn daily_tip(&self, profile: &Profile) -> String {
        let mut tips = match self.load_tips() {
            Ok(tips) if !tips.is_empty() => tips,
            Ok(_) => return FALLBACK_TIP.to_string(),
            Err(e) => {
                tracing::warn!("Error loading daily tips: {}", e);
                return FALLBACK_TIP.to_string();
            }
        };

        // Prefer tips tagged with the user's tone when any exist.
        let tone_label = profile.preferences.tone.as_str();
        let matching: Vec<TipEntry> = tips
            .iter()
            .filter(|entry| entry.tone.as_deref() == Some(tone_label))
            .cloned()
            .collect();
        if !matching.is_empty() {
            tips = matching;
        }

        tips.choose(&mut rand::thread_rng())
            .map(|entry| entry.tip.clone())
            .unwrap_or_else(|| FALLBACK_TIP.to_string())
    }

    fn guided_exercises(&self, emotion: Emotion, profile: &Profile) -> Vec<String> {
        let mut exercises = match self.load_emotion_content(emotion) {
            Ok(content) => content.exercises,
            Err(e) => {
                tracing::warn!("Error loading exercises: {}", e);
                return Vec::new();
            }
        };

        if profile.preferences.tone == TonePreference::Encouraging {
            exercises.push("Try a 5-minute power breathing exercise for positivity!".to_string());
        }

        exercises
    }

    fn resources(&self, emotion: Emotion, profile: &Profile) -> Vec<ResourceLink> {
        let mut links = match self.load_emotion_content(emotion) {
            Ok(content) => content
                .links
                .into_iter()
                .map(|entry| ResourceLink {
                    title: entry.title,
                    url: entry.url,
                })
                .collect::<Vec<_>>(),
            Err(e) => {
                tracing::warn!("Error loading resources: {}", e);
                return Vec::new();
            }
        };

        if profile.preferences.tone == TonePreference::Supportive {
            links.push(ResourceLink {
                title: "Supportive Mental Health Article".to_string(),
                url: "https://example.com/support".to_string(),
            });
        }

        links
    }
}

fn ensure_content_file(path: &Path, starter: &str) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, starter)?;
    Ok(())
}

const STARTER_TIPS: &str = r#"# Daily wellness tips. Optional tone tags narrow who sees a tip.

[[tip]]
tip = "Take three slow breaths before reaching for your phone in the morning."

[[tip]]
tip = "A ten-minute walk outside counts. Start there."
tone = "encouraging"

[[tip]]
tip = "Write down one thing that went well today, however small."
tone = "supportive"

[[tip]]
tip = "Drink a glass of water and unclench your jaw."

[[tip]]
tip = "Step away from screens for five minutes every hour."
tone = "gentle"
"#;

const STARTER_RESOURCES: &str = r#"# Guided exercises and resource links, keyed by emotion.

[emotions.joy]
exercises = [
    "Savoring walk: spend 10 minutes noticing things you enjoy.",
    "Write a short gratitude note to someone who helped you recently.",
]

[[emotions.joy.link]]
title = "The science of savoring good moments"
url = "https://www.example.org/savoring"

[emotions.content]
exercises = [
    "Body scan: move attention slowly from head to toe for 5 minutes.",
]

[[emotions.content.link]]
title = "Keeping a steady routine"
url = "https://www.example.org/routine"

[emotions.neutral]
exercises = [
    "Box breathing: inhale 4, hold 4, exhale 4, hold 4. Repeat 5 times.",
    "Name five things you can see, four you can hear, three you can touch.",
]

[[emotions.neutral.link]]
title = "Getting started with mindfulness"
url = "https://www.example.org/mindfulness"

[emotions.anxiety]
exercises = [
    "4-7-8 breathing: inhale 4 seconds, hold 7, exhale 8. Repeat 4 times.",
    "Ground yourself: press your feet into the floor and describe the room aloud.",
]

[[emotions.anxiety.link]]
title = "Understanding anxious thoughts"
url = "https://www.example.org/anxiety"

[emotions.anger]
exercises = [
    "Count to ten slowly before responding to what upset you.",
    "Progressive muscle relaxation: tense and release each muscle group.",
]

[[emotions.anger.link]]
title = "Cooling down strong emotions"
url = "https://www.example.org/anger"
"#;
