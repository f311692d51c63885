//! Task lifecycle manager wrapping the task backend.

use crate::sync::{
    domain::{
        NewTask, RemoteTask, RemoteTaskId, StatusTarget, StatusVocabulary, TaskDraft, TaskKind,
        TaskListId,
    },
    ports::{TaskBackend, TaskBackendResult},
};
use std::sync::Arc;
use tracing::{info, warn};

use super::effects::{BestEffortEffect, Diagnostic};

/// Destination lists for new tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQueues {
    /// List receiving problem tasks.
    pub problem: TaskListId,
    /// List receiving feature tasks.
    pub feature: TaskListId,
}

impl TaskQueues {
    /// Creates the queue pair.
    #[must_use]
    pub const fn new(problem: TaskListId, feature: TaskListId) -> Self {
        Self { problem, feature }
    }

    /// Returns the list for a task kind.
    #[must_use]
    pub const fn list_for(&self, kind: TaskKind) -> &TaskListId {
        match kind {
            TaskKind::Problem => &self.problem,
            TaskKind::Feature => &self.feature,
        }
    }
}

/// Result of adding a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOutcome {
    /// The backend accepted the tag.
    Added,
    /// The backend refused the tag; carries the error text.
    Rejected(String),
}

/// Single-call operations on remote tasks.
///
/// The manager owns no state. Status values it returns are raw backend
/// values.
#[derive(Debug)]
pub struct TaskLifecycleManager<B>
where
    B: TaskBackend,
{
    backend: Arc<B>,
    queues: TaskQueues,
    vocabulary: StatusVocabulary,
}

impl<B> TaskLifecycleManager<B>
where
    B: TaskBackend,
{
    /// Creates a manager over a task backend.
    #[must_use]
    pub const fn new(backend: Arc<B>, queues: TaskQueues, vocabulary: StatusVocabulary) -> Self {
        Self {
            backend,
            queues,
            vocabulary,
        }
    }

    /// Creates a task in the queue selected by the draft's kind, with the
    /// initial "to do" status.
    ///
    /// # Errors
    ///
    /// Propagates the backend error.
    pub async fn create_task(&self, draft: &TaskDraft) -> TaskBackendResult<RemoteTask> {
        let list = self.queues.list_for(draft.kind);
        let request = NewTask {
            name: draft.name.clone(),
            description: draft.description.clone(),
            status: self.vocabulary.name_for(StatusTarget::ToDo).to_owned(),
            tags: draft.tags.clone(),
        };
        let task = self.backend.create_task(list, &request).await?;
        info!(task_id = %task.id, kind = %draft.kind, list = %list, "created task");
        Ok(task)
    }

    /// Adds a tag to a task.
    ///
    /// A refusal is logged and reported as [`TagOutcome::Rejected`]; it is
    /// never an error, so re-adding a present tag cannot fail a run.
    pub async fn add_tag(&self, task_id: &RemoteTaskId, tag: &str) -> TagOutcome {
        match self.backend.add_tag(task_id, tag).await {
            Ok(()) => {
                info!(%task_id, tag, "tagged task");
                TagOutcome::Added
            }
            Err(err) => {
                warn!(%task_id, tag, error = %err, "task backend refused tag");
                TagOutcome::Rejected(err.to_string())
            }
        }
    }

    /// Moves a task to the backend status for `target`.
    ///
    /// # Errors
    ///
    /// Propagates the backend error.
    pub async fn set_status(
        &self,
        task_id: &RemoteTaskId,
        target: StatusTarget,
    ) -> TaskBackendResult<RemoteTask> {
        let status = self.vocabulary.name_for(target);
        let task = self.backend.set_status(task_id, status).await?;
        info!(%task_id, %target, status, "moved task");
        Ok(task)
    }

    /// Comments on a task with a link back to the originating ticket.
    ///
    /// Returns a diagnostic instead of failing.
    pub async fn post_link_comment(&self, task_id: &RemoteTaskId, url: &str) -> Option<Diagnostic> {
        let text = format!("Linked to GitHub issue: {url}");
        match self.backend.comment_on_task(task_id, &text).await {
            Ok(()) => None,
            Err(err) => {
                warn!(%task_id, error = %err, "link-back comment failed");
                Some(Diagnostic {
                    effect: "link_back",
                    task_id: task_id.clone(),
                    message: err.to_string(),
                })
            }
        }
    }

    /// Runs best-effort effects in order and collects their failures.
    pub async fn run_effects(&self, effects: &[BestEffortEffect]) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for effect in effects {
            let failure = match effect {
                BestEffortEffect::LinkBack { task_id, url } => {
                    self.post_link_comment(task_id, url).await
                }
            };
            diagnostics.extend(failure);
        }
        diagnostics
    }
}
