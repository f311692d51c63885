//! Ticket handler: resolves the link, plans, and executes ticket decisions.

use crate::sync::{
    domain::{
        RemoteTaskId, RepositoryFullName, StatusTarget, TagCasePolicy, TaskKind, TaskLink, Ticket,
        TicketAction, TicketDecision, TicketRef, plan_closed, plan_labeled, plan_opened,
        resolve_linked_task,
    },
    ports::{IssueHost, MessageRenderer, TaskBackend, TaskLinkStore, TemplateName, ticket_context},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info};

use super::{
    effects::{BestEffortEffect, SyncOutcome, SyncReport},
    error::SyncServiceResult,
    lifecycle::{TagOutcome, TaskLifecycleManager},
};

/// Handles `opened`, `labeled` and `closed` ticket events.
pub struct TicketHandler<H, B, S, R, C>
where
    H: IssueHost,
    B: TaskBackend,
    S: TaskLinkStore,
    R: MessageRenderer,
    C: Clock + Send + Sync,
{
    issue_host: Arc<H>,
    lifecycle: Arc<TaskLifecycleManager<B>>,
    links: Arc<S>,
    renderer: Arc<R>,
    clock: Arc<C>,
    tag_case: TagCasePolicy,
}

impl<H, B, S, R, C> TicketHandler<H, B, S, R, C>
where
    H: IssueHost,
    B: TaskBackend,
    S: TaskLinkStore,
    R: MessageRenderer,
    C: Clock + Send + Sync,
{
    /// Creates a ticket handler.
    #[must_use]
    pub const fn new(
        issue_host: Arc<H>,
        lifecycle: Arc<TaskLifecycleManager<B>>,
        links: Arc<S>,
        renderer: Arc<R>,
        clock: Arc<C>,
        tag_case: TagCasePolicy,
    ) -> Self {
        Self {
            issue_host,
            lifecycle,
            links,
            renderer,
            clock,
            tag_case,
        }
    }

    /// Handles one ticket event.
    ///
    /// The linked task is looked up only when the decision depends on it: a
    /// ticket without a type label on `opened`, or a closed ticket on
    /// `labeled`, needs no lookup.
    ///
    /// # Errors
    ///
    /// Returns [`super::SyncServiceError`] when the label state is invalid or
    /// a primary-path remote call fails. Link-back failures are reported as
    /// diagnostics instead.
    pub async fn handle(
        &self,
        repository: &RepositoryFullName,
        action: &TicketAction,
        ticket: &Ticket,
    ) -> SyncServiceResult<SyncReport> {
        let ticket_ref = TicketRef::new(repository.clone(), ticket.number());
        let decision = match action {
            TicketAction::Opened => {
                let linked = if ticket.has_type_label() {
                    self.linked_task(&ticket_ref).await?
                } else {
                    None
                };
                plan_opened(ticket, linked.as_ref(), self.tag_case)?
            }
            TicketAction::Labeled(label) => {
                let linked = if ticket.is_closed() {
                    None
                } else {
                    self.linked_task(&ticket_ref).await?
                };
                plan_labeled(ticket, label, linked.as_ref(), self.tag_case)?
            }
            TicketAction::Closed => plan_closed(self.linked_task(&ticket_ref).await?.as_ref()),
        };
        info!(ticket = %ticket_ref, action = action.as_str(), ?decision, "planned ticket event");
        self.execute(&ticket_ref, ticket, decision).await
    }

    /// Resolves the linked task from the store, falling back to the comment
    /// history.
    async fn linked_task(&self, ticket_ref: &TicketRef) -> SyncServiceResult<Option<RemoteTaskId>> {
        if let Some(link) = self.links.find(ticket_ref).await? {
            debug!(ticket = %ticket_ref, task_id = %link.task_id(), "link found in store");
            return Ok(Some(link.task_id().clone()));
        }
        let comments = self
            .issue_host
            .list_comments(ticket_ref.repository(), ticket_ref.number())
            .await?;
        let linked = resolve_linked_task(&comments);
        debug!(
            ticket = %ticket_ref,
            comments = comments.len(),
            task_id = ?linked,
            "scanned comments for link marker"
        );
        Ok(linked)
    }

    async fn execute(
        &self,
        ticket_ref: &TicketRef,
        ticket: &Ticket,
        decision: TicketDecision,
    ) -> SyncServiceResult<SyncReport> {
        match decision {
            TicketDecision::RequestLabels => {
                let body = self
                    .renderer
                    .render(TemplateName::MissingLabels, &ticket_context(ticket, None))?;
                self.comment(ticket_ref, &body).await?;
                Ok(SyncReport::new(SyncOutcome::LabelsRequested))
            }
            TicketDecision::CreateTask(draft) => {
                let task = self.lifecycle.create_task(&draft).await?;
                self.links
                    .record(&TaskLink::new(
                        ticket_ref.clone(),
                        task.id.clone(),
                        &*self.clock,
                    ))
                    .await?;
                let template = match draft.kind {
                    TaskKind::Problem => TemplateName::ProblemCreated,
                    TaskKind::Feature => TemplateName::FeatureCreated,
                };
                let body = self
                    .renderer
                    .render(template, &ticket_context(ticket, Some(&task)))?;
                self.comment(ticket_ref, &body).await?;

                let effects: Vec<_> = ticket
                    .html_url()
                    .map(|url| BestEffortEffect::LinkBack {
                        task_id: task.id.clone(),
                        url: url.to_owned(),
                    })
                    .into_iter()
                    .collect();
                let diagnostics = self.lifecycle.run_effects(&effects).await;
                Ok(SyncReport::new(SyncOutcome::TaskCreated(task)).with_diagnostics(diagnostics))
            }
            TicketDecision::AddTag { task_id, tag } => {
                let outcome = match self.lifecycle.add_tag(&task_id, &tag).await {
                    TagOutcome::Added => SyncOutcome::TagAdded { task_id, tag },
                    TagOutcome::Rejected(reason) => SyncOutcome::TagRejected {
                        task_id,
                        tag,
                        reason,
                    },
                };
                Ok(SyncReport::new(outcome))
            }
            TicketDecision::CompleteTask { task_id } => {
                let task = self.lifecycle.set_status(&task_id, StatusTarget::Done).await?;
                Ok(SyncReport::new(SyncOutcome::StatusChanged(task)))
            }
            TicketDecision::Skip(reason) => {
                info!(ticket = %ticket_ref, %reason, "skipping ticket event");
                Ok(SyncReport::skipped(reason))
            }
        }
    }

    async fn comment(&self, ticket_ref: &TicketRef, body: &str) -> SyncServiceResult<()> {
        self.issue_host
            .create_comment(ticket_ref.repository(), ticket_ref.number(), body)
            .await?;
        Ok(())
    }
}
