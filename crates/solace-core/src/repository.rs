//! Wellness repository trait.
//!
//! Defines the interface for per-user record persistence.

use anyhow::Result;
use async_trait::async_trait;

use crate::affect::{Emotion, Mood};
use crate::goal::GoalProgress;
use crate::profile::Profile;
use crate::record::UserRecord;
use crate::session::Turn;

/// An abstract repository for managing per-user wellness records.
///
/// This trait defines the contract for persisting and retrieving user
/// records, decoupling the application's core logic from the specific
/// storage mechanism (e.g., TOML files, a document database).
///
/// # Implementation Notes
///
/// Implementations must tolerate a missing record: `find_record` returns a
/// default empty record rather than an error, and every append/update
/// operation upserts. Writes refresh the record's `last_updated` stamp.
#[async_trait]
pub trait WellnessRepository: Send + Sync {
    /// Loads the record for `user_id`, or an empty default if none exists.
    async fn find_record(&self, user_id: &str) -> Result<UserRecord>;

    /// Appends conversation turns to the user's history.
    async fn append_turns(&self, user_id: &str, turns: &[Turn]) -> Result<()>;

    /// Appends a mood sample to the user's mood history.
    async fn append_mood(&self, user_id: &str, mood: Mood, emotion: Emotion) -> Result<()>;

    /// Appends an on-demand session summary.
    async fn append_summary(&self, user_id: &str, summary_text: &str) -> Result<()>;

    /// Replaces the user's profile.
    async fn set_profile(&self, user_id: &str, profile: &Profile) -> Result<()>;

    /// Replaces the user's habits summary.
    async fn set_habits(&self, user_id: &str, habits_text: &str) -> Result<()>;

    /// Adds a goal; returns its generated id.
    async fn add_goal(&self, user_id: &str, goal_text: &str) -> Result<String>;

    /// Sets the progress of an existing goal.
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: The goal existed and was updated
    /// - `Ok(false)`: No goal with that id
    /// - `Err(_)`: Error occurred during the update
    async fn update_goal_progress(
        &self,
        user_id: &str,
        goal_id: &str,
        progress: GoalProgress,
    ) -> Result<bool>;

    /// Lists known user ids, most recently updated first.
    async fn list_user_ids(&self) -> Result<Vec<String>>;

    /// Creates a record for `user_id` if none exists yet.
    async fn create_user(&self, user_id: &str) -> Result<()>;
}
