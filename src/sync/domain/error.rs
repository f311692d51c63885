//! Error types for synchronisation domain validation.

use thiserror::Error;

/// Errors returned while constructing or evaluating domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SyncDomainError {
    /// The repository name does not follow `owner/repo` format.
    #[error("invalid repository name '{0}', expected owner/repo")]
    InvalidRepository(String),

    /// The ticket or review request number is invalid.
    #[error("invalid ticket number {0}, expected a positive integer")]
    InvalidTicketNumber(u64),

    /// The remote task identifier is empty or not alphanumeric.
    #[error("invalid remote task id '{0}', expected ASCII letters and digits")]
    InvalidTaskId(String),

    /// The destination task list identifier is empty.
    #[error("task list id must not be empty")]
    EmptyTaskListId,

    /// The branch name is empty after trimming.
    #[error("branch name must not be empty")]
    EmptyBranchName,

    /// The label name is empty after trimming.
    #[error("label name must not be empty")]
    EmptyLabelName,

    /// A status name in the status vocabulary is empty.
    #[error("status name for '{0}' must not be empty")]
    EmptyStatusName(&'static str),

    /// The ticket carries more than one type label at once.
    #[error("more than one type label found: {}", .0.join(", "))]
    MultipleTypeLabels(Vec<String>),
}

/// Error returned while parsing a tag case policy from configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown tag case policy: {0}, expected lowercase or preserve")]
pub struct ParseTagCasePolicyError(pub String);
