//! Task entity, status enumeration, and service payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DocumentId;

/// Rejection raised when text names no known task status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown task status: {value}")]
pub struct ParseTaskStatusError {
    /// The rejected text.
    pub value: String,
}

/// Lifecycle state of a task.
///
/// The wire form is the kebab-case name; new tasks default to
/// [`TaskStatus::Pending`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started yet. Default at creation.
    #[default]
    Pending,
    /// Being worked on.
    InProgress,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// The wire form of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = ParseTaskStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in-progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            other => Err(ParseTaskStatusError {
                value: other.to_owned(),
            }),
        }
    }
}

/// A stored task record.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    /// Store-assigned identifier.
    pub id: DocumentId,
    /// Short summary, non-empty.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Lifecycle state; the only field mutable after creation.
    pub status: TaskStatus,
    /// Identifier of the owning user. Only the shape is verified, not the
    /// user's existence.
    pub user_id: DocumentId,
    /// Set by the store adapter at insert time.
    pub created_at: DateTime<Utc>,
    /// Set by the store adapter at every write.
    pub updated_at: DateTime<Utc>,
}

/// Validated payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Short summary, trimmed and non-empty.
    pub title: String,
    /// Optional trimmed description.
    pub description: Option<String>,
    /// Identifier of the owning user.
    pub user_id: DocumentId,
    /// Initial status; `None` falls back to [`TaskStatus::Pending`].
    pub status: Option<TaskStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pending", TaskStatus::Pending)]
    #[case("in-progress", TaskStatus::InProgress)]
    #[case("done", TaskStatus::Done)]
    fn status_round_trips_through_text(#[case] text: &str, #[case] status: TaskStatus) {
        assert_eq!(text.parse(), Ok(status));
        assert_eq!(status.to_string(), text);
    }

    #[rstest]
    #[case("")]
    #[case("Pending")]
    #[case("in progress")]
    #[case("cancelled")]
    fn unknown_status_text_is_rejected(#[case] text: &str) {
        assert!(text.parse::<TaskStatus>().is_err());
    }

    #[test]
    fn default_status_is_pending() {
        assert_eq!(TaskStatus::default(), TaskStatus::Pending);
    }

    #[test]
    fn status_serde_uses_kebab_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).expect("status serializes");
        assert_eq!(json, "\"in-progress\"");
    }
}
