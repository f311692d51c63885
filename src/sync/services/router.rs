//! Event router: dispatches one classified event to its handler.

use crate::sync::{
    domain::{EventContext, SkipReason, StatusVocabulary, SyncEvent, TagCasePolicy},
    ports::{IssueHost, MessageRenderer, TaskBackend, TaskLinkStore},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use super::{
    effects::SyncReport,
    error::SyncServiceResult,
    lifecycle::{TaskLifecycleManager, TaskQueues},
    review::ReviewRequestHandler,
    ticket::TicketHandler,
};

/// Adapters the handlers run against.
pub struct SyncPorts<H, B, S, R, C> {
    /// Issue tracker.
    pub issue_host: Arc<H>,
    /// Task backend.
    pub task_backend: Arc<B>,
    /// Explicit link store.
    pub link_store: Arc<S>,
    /// Message renderer.
    pub renderer: Arc<R>,
    /// Clock used to timestamp links.
    pub clock: Arc<C>,
}

/// Behaviour settings shared by the handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    /// Destination lists for new tasks.
    pub queues: TaskQueues,
    /// Backend status names.
    pub vocabulary: StatusVocabulary,
    /// Case policy for tags.
    pub tag_case: TagCasePolicy,
}

/// Routes events to the ticket or review-request handler.
pub struct EventRouter<H, B, S, R, C>
where
    H: IssueHost,
    B: TaskBackend,
    S: TaskLinkStore,
    R: MessageRenderer,
    C: Clock + Send + Sync,
{
    tickets: TicketHandler<H, B, S, R, C>,
    reviews: ReviewRequestHandler<H, B, R>,
}

impl<H, B, S, R, C> EventRouter<H, B, S, R, C>
where
    H: IssueHost,
    B: TaskBackend,
    S: TaskLinkStore,
    R: MessageRenderer,
    C: Clock + Send + Sync,
{
    /// Wires both handlers over shared ports.
    #[must_use]
    pub fn new(ports: SyncPorts<H, B, S, R, C>, settings: SyncSettings) -> Self {
        let lifecycle = Arc::new(TaskLifecycleManager::new(
            ports.task_backend,
            settings.queues,
            settings.vocabulary,
        ));
        Self {
            tickets: TicketHandler::new(
                Arc::clone(&ports.issue_host),
                Arc::clone(&lifecycle),
                ports.link_store,
                Arc::clone(&ports.renderer),
                ports.clock,
                settings.tag_case,
            ),
            reviews: ReviewRequestHandler::new(ports.issue_host, lifecycle, ports.renderer),
        }
    }

    /// Processes one event inside an `invocation` span.
    ///
    /// Events outside the handled set are skipped without error.
    ///
    /// # Errors
    ///
    /// Propagates the handler's [`super::SyncServiceError`].
    pub async fn dispatch(&self, context: &EventContext) -> SyncServiceResult<SyncReport> {
        let span = info_span!(
            "invocation",
            run_id = %Uuid::new_v4(),
            event = event_name(context.event()),
            repository = %context.repository(),
        );
        self.route(context).instrument(span).await
    }

    async fn route(&self, context: &EventContext) -> SyncServiceResult<SyncReport> {
        let repository = context.repository();
        let report = match context.event() {
            SyncEvent::Ticket { action, ticket } => {
                self.tickets.handle(repository, action, ticket).await?
            }
            SyncEvent::ReviewRequest {
                action,
                review_request,
            } => self.reviews.handle(repository, action, review_request).await?,
            SyncEvent::Unhandled { event_name, action } => {
                info!(event_name = event_name.as_str(), ?action, "ignoring unhandled event");
                SyncReport::skipped(SkipReason::UnhandledEvent)
            }
        };
        info!(outcome = ?report.outcome, diagnostics = report.diagnostics.len(), "event processed");
        Ok(report)
    }
}

fn event_name(event: &SyncEvent) -> &str {
    match event {
        SyncEvent::Ticket { .. } => "issues",
        SyncEvent::ReviewRequest { .. } => "pull_request",
        SyncEvent::Unhandled { event_name, .. } => event_name.as_str(),
    }
}
