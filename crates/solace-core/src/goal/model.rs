//! Goal domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Progress state of a wellness goal.
///
/// Transitions are unconstrained: any state is settable from any prior
/// state, and goals are never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GoalProgress {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    Started,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl GoalProgress {
    /// Returns the display label, which is also the persisted form.
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalProgress::NotStarted => "Not Started",
            GoalProgress::Started => "Started",
            GoalProgress::InProgress => "In Progress",
            GoalProgress::Completed => "Completed",
        }
    }

    /// Parses a label; `None` for unknown values.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "not started" | "not-started" | "notstarted" => Some(GoalProgress::NotStarted),
            "started" => Some(GoalProgress::Started),
            "in progress" | "in-progress" | "inprogress" => Some(GoalProgress::InProgress),
            "completed" | "done" => Some(GoalProgress::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for GoalProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-created wellness goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier (UUID format).
    pub id: String,
    /// The goal text as the user entered it.
    pub text: String,
    /// Current progress state.
    #[serde(default)]
    pub progress: GoalProgress,
}

impl Goal {
    /// Creates a new goal with a fresh id and `Not Started` progress.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            progress: GoalProgress::NotStarted,
        }
    }
}
