//! Identifier and validated scalar types for the synchronisation domain.

use super::SyncDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Positive ticket or review request number from the issue tracker.
///
/// Issues and pull requests share one number space on the issue host, so the
/// same type identifies both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketNumber(u64);

impl TicketNumber {
    /// Creates a validated ticket number.
    ///
    /// # Errors
    ///
    /// Returns [`SyncDomainError::InvalidTicketNumber`] when the value is zero.
    pub const fn new(value: u64) -> Result<Self, SyncDomainError> {
        if value == 0 {
            return Err(SyncDomainError::InvalidTicketNumber(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a task in the remote task backend.
///
/// Identifiers are non-empty runs of ASCII letters and digits, which is the
/// exact shape carried by a `CU-<task-id>` link marker.
///
/// # Examples
///
///     use tasklink::sync::domain::RemoteTaskId;
///
///     let id = RemoteTaskId::new("86c0ab12").expect("valid");
///     assert_eq!(id.marker(), "CU-86c0ab12");
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RemoteTaskId(String);

impl RemoteTaskId {
    /// Creates a validated remote task identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SyncDomainError::InvalidTaskId`] when the value is empty or
    /// contains anything other than ASCII letters and digits.
    pub fn new(value: impl Into<String>) -> Result<Self, SyncDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() || !normalized.chars().all(|ch| ch.is_ascii_alphanumeric()) {
            return Err(SyncDomainError::InvalidTaskId(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the link marker that references this task in comment bodies.
    #[must_use]
    pub fn marker(&self) -> String {
        format!("CU-{}", self.0)
    }
}

impl TryFrom<String> for RemoteTaskId {
    type Error = SyncDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RemoteTaskId> for String {
    fn from(value: RemoteTaskId) -> Self {
        value.0
    }
}

impl AsRef<str> for RemoteTaskId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RemoteTaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a destination queue (list) in the task backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskListId(String);

impl TaskListId {
    /// Creates a validated task list identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SyncDomainError::EmptyTaskListId`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, SyncDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(SyncDomainError::EmptyTaskListId);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalized repository identifier in `owner/repo` format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepositoryFullName {
    owner: String,
    name: String,
}

impl RepositoryFullName {
    /// Creates a validated repository name.
    ///
    /// # Errors
    ///
    /// Returns [`SyncDomainError::InvalidRepository`] if the value does not
    /// contain exactly one slash-delimited owner and repository segment.
    pub fn new(value: impl Into<String>) -> Result<Self, SyncDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let Some((owner, name)) = normalized.split_once('/') else {
            return Err(SyncDomainError::InvalidRepository(raw));
        };
        let is_valid = !owner.is_empty()
            && !name.is_empty()
            && !name.contains('/')
            && !normalized.chars().any(char::is_whitespace);
        if !is_valid {
            return Err(SyncDomainError::InvalidRepository(raw));
        }

        Ok(Self {
            owner: owner.to_owned(),
            name: name.to_owned(),
        })
    }

    /// Returns the owning account or organisation.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the repository name without its owner.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl TryFrom<String> for RepositoryFullName {
    type Error = SyncDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RepositoryFullName> for String {
    fn from(value: RepositoryFullName) -> Self {
        value.to_string()
    }
}

impl fmt::Display for RepositoryFullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
