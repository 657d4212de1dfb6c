//! TOML-based WellnessRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;

use solace_core::affect::{Emotion, Mood, MoodSample};
use solace_core::goal::{Goal, GoalProgress};
use solace_core::profile::Profile;
use solace_core::record::UserRecord;
use solace_core::repository::WellnessRepository;
use solace_core::session::{SessionSummary, Turn};

use crate::dto::UserRecordV1;
use crate::paths::SolacePaths;

/// A repository implementation storing one TOML file per user.
///
/// - Uses DTOs (`UserRecordV1`) for persistence
/// - Stores records as individual TOML files in a users directory
/// - Tolerates missing records by materializing empty defaults
/// - Every write refreshes the record's `last_updated` stamp
pub struct TomlWellnessRepository {
    base_dir: PathBuf,
}

impl TomlWellnessRepository {
    /// Creates a new repository with the specified base directory.
    ///
    /// The directory structure will be created if it doesn't exist:
    /// ```text
    /// base_dir/
    /// └── users/
    ///     ├── maya.toml
    ///     └── rohan.toml
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the directory structure cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();

        let users_dir = base_dir.join("users");
        fs::create_dir_all(&users_dir).context("Failed to create users directory")?;

        Ok(Self { base_dir })
    }

    /// Creates a repository at the default data directory location.
    pub fn default_location() -> Result<Self> {
        let data_dir = SolacePaths::data_dir()
            .map_err(|e| anyhow::anyhow!("Failed to resolve data directory: {}", e))?;
        Self::new(data_dir)
    }

    /// Returns the file path for a given user id.
    fn user_file_path(&self, user_id: &str) -> PathBuf {
        self.base_dir
            .join("users")
            .join(format!("{}.toml", sanitize_user_id(user_id)))
    }

    /// Loads a record from a specific file path.
    fn load_record_from_path(&self, path: &Path) -> Result<UserRecord> {
        let toml_content = fs::read_to_string(path)
            .context(format!("Failed to read user record file: {:?}", path))?;

        let dto: UserRecordV1 = toml::from_str(&toml_content)
            .context(format!("Failed to parse user record file: {:?}", path))?;

        Ok(dto.into_domain())
    }

    /// Loads the record for `user_id`, synthesizing defaults for missing
    /// or unparsable records ("new user" semantics).
    fn load_or_default(&self, user_id: &str) -> UserRecord {
        let path = self.user_file_path(user_id);
        if !path.exists() {
            return UserRecord::empty(user_id);
        }

        match self.load_record_from_path(&path) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(
                    "Unreadable record for '{}' ({}); starting fresh",
                    user_id,
                    e
                );
                UserRecord::empty(user_id)
            }
        }
    }

    /// Writes a record back to disk with a refreshed `last_updated` stamp.
    fn store(&self, record: &mut UserRecord) -> Result<()> {
        record.last_updated = Some(Utc::now().to_rfc3339());

        let dto = UserRecordV1::from(&*record);
        let toml_content =
            toml::to_string_pretty(&dto).context("Failed to serialize user record to TOML")?;

        let path = self.user_file_path(&record.user_id);
        fs::write(&path, toml_content)
            .context(format!("Failed to write user record file: {:?}", path))?;

        Ok(())
    }

    /// Read-modify-write helper shared by all mutation operations.
    fn mutate(&self, user_id: &str, apply: impl FnOnce(&mut UserRecord)) -> Result<()> {
        let mut record = self.load_or_default(user_id);
        apply(&mut record);
        self.store(&mut record)
    }
}

/// Keeps user ids safe to use as file names.
fn sanitize_user_id(user_id: &str) -> String {
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

#[async_trait]
impl WellnessRepository for TomlWellnessRepository {
    async fn find_record(&self, user_id: &str) -> Result<UserRecord> {
        Ok(self.load_or_default(user_id))
    }

    async fn append_turns(&self, user_id: &str, turns: &[Turn]) -> Result<()> {
        self.mutate(user_id, |record| {
            record.conversation.extend_from_slice(turns);
        })
    }

    async fn append_mood(&self, user_id: &str, mood: Mood, emotion: Emotion) -> Result<()> {
        self.mutate(user_id, |record| {
            record.mood_history.push(MoodSample {
                mood,
                emotion,
                timestamp: Utc::now().to_rfc3339(),
            });
        })
    }

    async fn append_summary(&self, user_id: &str, summary_text: &str) -> Result<()> {
        self.mutate(user_id, |record| {
            record.session_summaries.push(SessionSummary {
                text: summary_text.to_string(),
                timestamp: Utc::now().to_rfc3339(),
            });
        })
    }

    async fn set_profile(&self, user_id: &str, profile: &Profile) -> Result<()> {
        self.mutate(user_id, |record| {
            record.profile = profile.clone();
        })
    }

    async fn set_habits(&self, user_id: &str, habits_text: &str) -> Result<()> {
        self.mutate(user_id, |record| {
            record.profile.habits_summary = habits_text.to_string();
        })
    }

    async fn add_goal(&self, user_id: &str, goal_text: &str) -> Result<String> {
        let goal = Goal::new(goal_text);
        let goal_id = goal.id.clone();
        self.mutate(user_id, |record| {
            record.goals.push(goal);
        })?;
        Ok(goal_id)
    }

    async fn update_goal_progress(
        &self,
        user_id: &str,
        goal_id: &str,
        progress: GoalProgress,
    ) -> Result<bool> {
        let mut record = self.load_or_default(user_id);
        let Some(goal) = record.goals.iter_mut().find(|goal| goal.id == goal_id) else {
            return Ok(false);
        };
        goal.progress = progress;
        self.store(&mut record)?;
        Ok(true)
    }

    async fn list_user_ids(&self) -> Result<Vec<String>> {
        let users_dir = self.base_dir.join("users");
        let mut records = Vec::new();

        for entry in fs::read_dir(&users_dir).context("Failed to read users directory")? {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.extension().and_then(|s| s.to_str()) == Some("toml") {
                if let Ok(record) = self.load_record_from_path(&path) {
                    records.push((record.user_id, record.last_updated));
                }
            }
        }

        // Most recently updated first; never-updated records sort last.
        records.sort_by(|a, b| b.1.cmp(&a.1));

        Ok(records.into_iter().map(|(user_id, _)| user_id).collect())
    }

    async fn create_user(&self, user_id: &str) -> Result<()> {
        let path = self.user_file_path(user_id);
        if path.exists() {
            return Ok(());
        }
        self.store(&mut UserRecord::empty(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solace_core::profile::TonePreference;
    use tempfile::TempDir;

    fn repository() -> (TempDir, TomlWellnessRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repository = TomlWellnessRepository::new(temp_dir.path()).unwrap();
        (temp_dir, repository)
    }

    #[tokio::test]
    async fn missing_record_materializes_defaults() {
        let (_dir, repo) = repository();

        let record = repo.find_record("newcomer").await.unwrap();

        assert_eq!(record.user_id, "newcomer");
        assert!(record.conversation.is_empty());
        assert_eq!(record.profile.name, "newcomer");
        assert_eq!(
            record.profile.habits_summary,
            "User is new to wellness tracking."
        );
    }

    #[tokio::test]
    async fn append_turns_round_trips() {
        let (_dir, repo) = repository();

        let turns = vec![
            Turn::new(
                solace_core::session::MessageRole::User,
                "hello",
                "2024-01-01T00:00:00Z",
            )
            .with_affect(Mood::Calm, Emotion::Neutral),
            Turn::new(
                solace_core::session::MessageRole::Assistant,
                "hi there",
                "2024-01-01T00:00:01Z",
            ),
        ];
        repo.append_turns("maya", &turns).await.unwrap();

        let record = repo.find_record("maya").await.unwrap();
        assert_eq!(record.conversation, turns);
        assert!(record.last_updated.is_some());
    }

    #[tokio::test]
    async fn append_mood_grows_history() {
        let (_dir, repo) = repository();

        repo.append_mood("maya", Mood::Happy, Emotion::Joy)
            .await
            .unwrap();
        repo.append_mood("maya", Mood::Sad, Emotion::Anxiety)
            .await
            .unwrap();

        let record = repo.find_record("maya").await.unwrap();
        assert_eq!(record.mood_history.len(), 2);
        assert_eq!(record.mood_history[0].mood, Mood::Happy);
        assert_eq!(record.mood_history[1].emotion, Emotion::Anxiety);
    }

    #[tokio::test]
    async fn goal_lifecycle() {
        let (_dir, repo) = repository();

        let goal_id = repo.add_goal("maya", "walk daily").await.unwrap();

        let record = repo.find_record("maya").await.unwrap();
        assert_eq!(record.goals.len(), 1);
        assert_eq!(record.goals[0].progress, GoalProgress::NotStarted);

        let updated = repo
            .update_goal_progress("maya", &goal_id, GoalProgress::Completed)
            .await
            .unwrap();
        assert!(updated);

        let record = repo.find_record("maya").await.unwrap();
        assert_eq!(record.goals[0].progress, GoalProgress::Completed);

        let missing = repo
            .update_goal_progress("maya", "no-such-goal", GoalProgress::Started)
            .await
            .unwrap();
        assert!(!missing);
    }

    #[tokio::test]
    async fn profile_and_habits_updates() {
        let (_dir, repo) = repository();

        let mut profile = Profile::for_user("maya");
        profile.preferences.tone = TonePreference::Encouraging;
        profile.preferences.language = "Hindi".to_string();
        repo.set_profile("maya", &profile).await.unwrap();

        repo.set_habits("maya", "Sleeps late, walks in the morning.")
            .await
            .unwrap();

        let record = repo.find_record("maya").await.unwrap();
        assert_eq!(record.profile.preferences.tone, TonePreference::Encouraging);
        assert_eq!(record.profile.preferences.language, "Hindi");
        assert_eq!(
            record.profile.habits_summary,
            "Sleeps late, walks in the morning."
        );
    }

    #[tokio::test]
    async fn summaries_append() {
        let (_dir, repo) = repository();

        repo.append_summary("maya", "Mostly calm week.").await.unwrap();
        let record = repo.find_record("maya").await.unwrap();
        assert_eq!(record.session_summaries.len(), 1);
        assert_eq!(record.session_summaries[0].text, "Mostly calm week.");
    }

    #[tokio::test]
    async fn list_user_ids_most_recent_first() {
        let (_dir, repo) = repository();

        repo.create_user("older").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        repo.create_user("newer").await.unwrap();

        let ids = repo.list_user_ids().await.unwrap();
        assert_eq!(ids, vec!["newer".to_string(), "older".to_string()]);
    }

    #[tokio::test]
    async fn create_user_is_idempotent() {
        let (_dir, repo) = repository();

        repo.create_user("maya").await.unwrap();
        repo.add_goal("maya", "stretch").await.unwrap();
        repo.create_user("maya").await.unwrap();

        let record = repo.find_record("maya").await.unwrap();
        assert_eq!(record.goals.len(), 1);
    }

    #[tokio::test]
    async fn corrupt_record_degrades_to_defaults() {
        let (dir, repo) = repository();

        let path = dir.path().join("users").join("broken.toml");
        fs::write(&path, "this is not toml {{{{").unwrap();

        let record = repo.find_record("broken").await.unwrap();
        assert!(record.conversation.is_empty());
        assert_eq!(record.user_id, "broken");
    }
}
