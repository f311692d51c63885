//! Review-request handler: branch-linked status transitions.

use crate::sync::{
    domain::{RepositoryFullName, ReviewAction, ReviewDecision, ReviewRequest, plan_review},
    ports::{IssueHost, MessageRenderer, TaskBackend, TemplateName, task_context},
};
use std::sync::Arc;
use tracing::info;

use super::{
    effects::{SyncOutcome, SyncReport},
    error::SyncServiceResult,
    lifecycle::TaskLifecycleManager,
};

/// Moves the task named by a review request's branch and reports the new
/// status on the review request.
pub struct ReviewRequestHandler<H, B, R>
where
    H: IssueHost,
    B: TaskBackend,
    R: MessageRenderer,
{
    issue_host: Arc<H>,
    lifecycle: Arc<TaskLifecycleManager<B>>,
    renderer: Arc<R>,
}

impl<H, B, R> ReviewRequestHandler<H, B, R>
where
    H: IssueHost,
    B: TaskBackend,
    R: MessageRenderer,
{
    /// Creates a review-request handler.
    #[must_use]
    pub const fn new(
        issue_host: Arc<H>,
        lifecycle: Arc<TaskLifecycleManager<B>>,
        renderer: Arc<R>,
    ) -> Self {
        Self {
            issue_host,
            lifecycle,
            renderer,
        }
    }

    /// Handles one review-request event.
    ///
    /// Drafts and branches without a task marker make no remote call.
    ///
    /// # Errors
    ///
    /// Returns [`super::SyncServiceError`] when the status change, rendering
    /// or the status comment fails.
    pub async fn handle(
        &self,
        repository: &RepositoryFullName,
        action: &ReviewAction,
        review_request: &ReviewRequest,
    ) -> SyncServiceResult<SyncReport> {
        let decision = plan_review(review_request, action);
        info!(
            review_request = review_request.number().value(),
            branch = %review_request.branch(),
            %action,
            ?decision,
            "planned review-request event"
        );
        match decision {
            ReviewDecision::SetStatus { task_id, target } => {
                let task = self.lifecycle.set_status(&task_id, target).await?;
                let body = self
                    .renderer
                    .render(TemplateName::PrStatusChanged, &task_context(&task))?;
                self.issue_host
                    .create_comment(repository, review_request.number(), &body)
                    .await?;
                Ok(SyncReport::new(SyncOutcome::StatusChanged(task)))
            }
            ReviewDecision::Skip(reason) => Ok(SyncReport::skipped(reason)),
        }
    }
}
