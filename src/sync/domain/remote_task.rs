//! Remote task records and the status vocabulary used to move them.

use super::{RemoteTaskId, SyncDomainError, TaskKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a remote task as reported by the task backend.
///
/// Values are surfaced raw; escaping for message templates happens at the
/// rendering boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatus {
    /// Status name, e.g. `in review`.
    pub name: String,
    /// Display color, e.g. `#a875ff`.
    pub color: String,
}

impl TaskStatus {
    /// Creates a status from its name and display color.
    #[must_use]
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Task record owned by the remote task backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTask {
    /// Backend task identifier.
    pub id: RemoteTaskId,
    /// Browser URL of the task.
    pub url: String,
    /// Current status.
    pub status: TaskStatus,
    /// Tags currently attached to the task.
    pub tags: Vec<String>,
}

impl RemoteTask {
    /// Returns the link marker that references this task.
    #[must_use]
    pub fn marker(&self) -> String {
        self.id.marker()
    }
}

/// Abstract lifecycle position a task is moved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTarget {
    /// Initial status of a newly created task.
    ToDo,
    /// The linked review request awaits review.
    InReview,
    /// The work is finished.
    Done,
}

impl StatusTarget {
    /// Returns the canonical name of the target.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "to_do",
            Self::InReview => "in_review",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for StatusTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend status names for each [`StatusTarget`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusVocabulary {
    to_do: String,
    in_review: String,
    done: String,
}

impl StatusVocabulary {
    /// Creates a vocabulary from explicit backend status names.
    ///
    /// # Errors
    ///
    /// Returns [`SyncDomainError::EmptyStatusName`] when any name is blank.
    pub fn new(
        to_do: impl Into<String>,
        in_review: impl Into<String>,
        done: impl Into<String>,
    ) -> Result<Self, SyncDomainError> {
        Ok(Self {
            to_do: non_empty_status(to_do.into(), StatusTarget::ToDo)?,
            in_review: non_empty_status(in_review.into(), StatusTarget::InReview)?,
            done: non_empty_status(done.into(), StatusTarget::Done)?,
        })
    }

    /// Returns the backend status name for a target.
    #[must_use]
    pub fn name_for(&self, target: StatusTarget) -> &str {
        match target {
            StatusTarget::ToDo => &self.to_do,
            StatusTarget::InReview => &self.in_review,
            StatusTarget::Done => &self.done,
        }
    }
}

impl Default for StatusVocabulary {
    fn default() -> Self {
        Self {
            to_do: "to do".to_owned(),
            in_review: "in review".to_owned(),
            done: "done".to_owned(),
        }
    }
}

fn non_empty_status(value: String, target: StatusTarget) -> Result<String, SyncDomainError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(SyncDomainError::EmptyStatusName(target.as_str()));
    }
    Ok(normalized.to_owned())
}

/// Task to be created for a ticket, before a destination queue is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Problem or feature, selecting the destination queue.
    pub kind: TaskKind,
    /// Task name.
    pub name: String,
    /// Task description, copied from the ticket body.
    pub description: Option<String>,
    /// Initial tags, already normalized by the tag case policy.
    pub tags: Vec<String>,
}

/// Fully resolved create-task request sent to the task backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTask {
    /// Task name.
    pub name: String,
    /// Task description.
    pub description: Option<String>,
    /// Initial status name.
    pub status: String,
    /// Initial tags.
    pub tags: Vec<String>,
}
