//! Task backend port: remote task creation and mutation.

use crate::sync::domain::{NewTask, RemoteTask, RemoteTaskId, TaskListId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task backend operations.
pub type TaskBackendResult<T> = Result<T, TaskBackendError>;

/// Remote task backend contract.
///
/// Every operation is a single remote call; implementations do not retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskBackend: Send + Sync {
    /// Creates a task in the given destination list.
    async fn create_task(&self, list: &TaskListId, task: &NewTask)
    -> TaskBackendResult<RemoteTask>;

    /// Attaches a tag to an existing task.
    async fn add_tag(&self, task_id: &RemoteTaskId, tag: &str) -> TaskBackendResult<()>;

    /// Moves a task to the named status and returns the updated record.
    async fn set_status(
        &self,
        task_id: &RemoteTaskId,
        status: &str,
    ) -> TaskBackendResult<RemoteTask>;

    /// Posts a comment on a task.
    async fn comment_on_task(&self, task_id: &RemoteTaskId, text: &str) -> TaskBackendResult<()>;
}

/// Errors returned by task backend implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskBackendError {
    /// The task backend answered with a non-success status.
    #[error("task backend returned HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The task does not exist.
    #[error("remote task not found: {0}")]
    NotFound(RemoteTaskId),

    /// The response could not be decoded.
    #[error("failed to decode task backend response: {0}")]
    Decode(String),

    /// Transport-level failure.
    #[error("task backend transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskBackendError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
