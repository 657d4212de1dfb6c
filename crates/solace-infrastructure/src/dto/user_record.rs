//! User record DTO and schema versioning.
//!
//! The persisted layout carries an explicit `schema_version` so future
//! schema changes can be detected and migrated at load time. Leaf types
//! (turns, goals, profile) are stable label-based structures and are
//! reused from the domain directly.

use serde::{Deserialize, Serialize};

use solace_core::affect::MoodSample;
use solace_core::goal::Goal;
use solace_core::profile::Profile;
use solace_core::record::UserRecord;
use solace_core::session::{SessionSummary, Turn};

/// Current schema version written by this build.
pub const USER_RECORD_VERSION: &str = "1.0.0";

/// Represents V1.0.0 of the user record schema.
///
/// Field order matters for TOML output: scalar fields first, then the
/// profile table, then arrays of tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecordV1 {
    /// Schema version of this record file.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// The user identity this record belongs to.
    pub user_id: String,
    /// Timestamp of the last write (ISO 8601 format).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    /// The user's profile.
    #[serde(default = "default_profile")]
    pub profile: Profile,
    /// Append-only mood history.
    #[serde(default)]
    pub mood_history: Vec<MoodSample>,
    /// Wellness goals.
    #[serde(default)]
    pub goals: Vec<Goal>,
    /// On-demand session summaries.
    #[serde(default)]
    pub session_summaries: Vec<SessionSummary>,
    /// Ordered conversation history.
    #[serde(default)]
    pub conversation: Vec<Turn>,
}

fn default_schema_version() -> String {
    USER_RECORD_VERSION.to_string()
}

fn default_profile() -> Profile {
    Profile::for_user("default_user")
}

impl From<&UserRecord> for UserRecordV1 {
    fn from(record: &UserRecord) -> Self {
        Self {
            schema_version: USER_RECORD_VERSION.to_string(),
            user_id: record.user_id.clone(),
            last_updated: record.last_updated.clone(),
            profile: record.profile.clone(),
            mood_history: record.mood_history.clone(),
            goals: record.goals.clone(),
            session_summaries: record.session_summaries.clone(),
            conversation: record.conversation.clone(),
        }
    }
}

impl UserRecordV1 {
    /// Converts the DTO into the domain model.
    pub fn into_domain(self) -> UserRecord {
        UserRecord {
            user_id: self.user_id,
            conversation: self.conversation,
            mood_history: self.mood_history,
            goals: self.goals,
            profile: self.profile,
            session_summaries: self.session_summaries,
            last_updated: self.last_updated,
        }
    }
}
