//! Audio artifact dispatch.
//!
//! Wraps a speech synthesizer with cache-directory management: each
//! utterance becomes a uniquely named MP3 under the audio cache, with one
//! fallback into a kept temporary file when the cache write fails. No
//! failure here propagates; the result is simply "no audio".

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use solace_core::services::SpeechSynthesizer;
use solace_core::session::MessageRole;
use solace_infrastructure::SolacePaths;

/// Synthesizes speech and stores the audio artifacts.
pub struct SpeechService {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    cache_dir: PathBuf,
}

impl SpeechService {
    /// Creates a service writing artifacts under `cache_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache directory cannot be created.
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        cache_dir: impl Into<PathBuf>,
    ) -> std::io::Result<Self> {
        let cache_dir = cache_dir.into();
        std::fs::create_dir_all(&cache_dir)?;
        Ok(Self {
            synthesizer,
            cache_dir,
        })
    }

    /// Creates a service over the default audio cache location.
    pub fn default_location(synthesizer: Arc<dyn SpeechSynthesizer>) -> std::io::Result<Self> {
        let cache_dir = SolacePaths::audio_cache_dir()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()))?;
        Self::new(synthesizer, cache_dir)
    }

    /// Synthesizes `text` and writes it to a uniquely named artifact.
    ///
    /// Synthesis gets one retry; a failed cache write falls back to a kept
    /// temporary file. Returns `None` when no audio could be produced.
    pub async fn speak(
        &self,
        text: &str,
        user_id: &str,
        role: MessageRole,
        lang: &str,
    ) -> Option<PathBuf> {
        let bytes = match self.synthesizer.synthesize(text, lang).await {
            Ok(bytes) => bytes,
            Err(first) => {
                log::warn!("Speech synthesis failed ({first}); retrying once");
                match self.synthesizer.synthesize(text, lang).await {
                    Ok(bytes) => bytes,
                    Err(second) => {
                        log::warn!("Speech synthesis retry failed ({second}); no audio produced");
                        return None;
                    }
                }
            }
        };

        let primary = self.cache_dir.join(audio_file_name(user_id, role));
        match std::fs::write(&primary, &bytes) {
            Ok(()) => Some(primary),
            Err(e) => {
                log::warn!("Failed to write audio artifact {primary:?} ({e}); using a temp file");
                write_to_temp(&bytes)
            }
        }
    }
}

/// Builds a unique per-user, per-role artifact name.
fn audio_file_name(user_id: &str, role: MessageRole) -> String {
    let timestamp = Utc::now().format("%Y%m%d%H%M%S");
    let suffix = Uuid::new_v4().simple();
    format!(
        "{}_{}_{}_{}.mp3",
        sanitize(user_id),
        role.audio_label(),
        timestamp,
        suffix
    )
}

fn sanitize(user_id: &str) -> String {
    user_id
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn write_to_temp(bytes: &[u8]) -> Option<PathBuf> {
    let file = tempfile::Builder::new()
        .prefix("solace_audio_")
        .suffix(".mp3")
        .tempfile()
        .ok()?;
    let (mut handle, path) = file.keep().ok()?;
    handle.write_all(bytes).ok()?;
    Some(path)
}
