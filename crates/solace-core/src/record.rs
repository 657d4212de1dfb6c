//! Per-user wellness record.
//!
//! The record is the unit of persistence: everything known about a user
//! identity lives in one document. It is read at the start of an
//! interaction and written back at the end; last writer wins.

use serde::{Deserialize, Serialize};

use crate::affect::MoodSample;
use crate::goal::Goal;
use crate::profile::Profile;
use crate::session::{SessionSummary, Turn};

/// Aggregated per-user state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// The user identity this record belongs to.
    pub user_id: String,
    /// Ordered conversation history.
    pub conversation: Vec<Turn>,
    /// Append-only mood history, insertion order.
    pub mood_history: Vec<MoodSample>,
    /// Wellness goals; never deleted.
    pub goals: Vec<Goal>,
    /// The user's profile.
    pub profile: Profile,
    /// Append-only log of on-demand session summaries.
    pub session_summaries: Vec<SessionSummary>,
    /// Timestamp of the last write (ISO 8601 format), if any.
    pub last_updated: Option<String>,
}

impl UserRecord {
    /// Materializes the default record for a user with no stored state.
    pub fn empty(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            conversation: Vec::new(),
            mood_history: Vec::new(),
            goals: Vec::new(),
            profile: Profile::for_user(user_id),
            session_summaries: Vec::new(),
            last_updated: None,
        }
    }

    /// Returns the last `n` mood samples, oldest first.
    pub fn recent_moods(&self, n: usize) -> &[MoodSample] {
        let start = self.mood_history.len().saturating_sub(n);
        &self.mood_history[start..]
    }

    /// Returns the texts of prior assistant turns, oldest first.
    pub fn assistant_suggestions(&self) -> Vec<String> {
        self.conversation
            .iter()
            .filter(|turn| turn.role == crate::session::MessageRole::Assistant)
            .map(|turn| turn.text.clone())
            .collect()
    }
}
