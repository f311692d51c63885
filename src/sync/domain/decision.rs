//! Pure decision rules for ticket and review-request events.
//!
//! Planners compute what should happen from the event and the already
//! fetched ticket state; they never talk to a port. Executors in the service
//! layer carry decisions out.

use super::{
    Label, LabelClass, RemoteTaskId, ReviewAction, ReviewRequest, StatusTarget, SyncDomainError,
    TagCasePolicy, TaskDraft, Ticket, TypeLabelState, resolve_kind, syncable_tags,
    task_id_from_branch,
};
use std::fmt;

/// Reason an event produced no remote mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The ticket was already closed when the event arrived.
    TicketClosed,
    /// No linked task exists for the ticket.
    NoLinkedTask,
    /// The ticket already has a linked task.
    AlreadyLinked,
    /// The added label neither creates nor tags a task in the current state.
    LabelNotActionable,
    /// The only type label carries an unrecognised suffix.
    UnrecognisedTypeLabel,
    /// The review request is a draft.
    DraftReviewRequest,
    /// The review request's branch does not follow the task naming convention.
    UnlinkedBranch,
    /// The event or action is outside the handled set.
    UnhandledEvent,
}

impl SkipReason {
    /// Returns a stable, log-friendly name for the reason.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TicketClosed => "ticket_closed",
            Self::NoLinkedTask => "no_linked_task",
            Self::AlreadyLinked => "already_linked",
            Self::LabelNotActionable => "label_not_actionable",
            Self::UnrecognisedTypeLabel => "unrecognised_type_label",
            Self::DraftReviewRequest => "draft_review_request",
            Self::UnlinkedBranch => "unlinked_branch",
            Self::UnhandledEvent => "unhandled_event",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision for a ticket event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketDecision {
    /// Ask the reporter for a type label.
    RequestLabels,
    /// Create the ticket's task.
    CreateTask(TaskDraft),
    /// Tag the existing task.
    AddTag {
        /// Linked task.
        task_id: RemoteTaskId,
        /// Tag name, normalized by the tag case policy.
        tag: String,
    },
    /// Move the existing task to its completed status.
    CompleteTask {
        /// Linked task.
        task_id: RemoteTaskId,
    },
    /// Do nothing.
    Skip(SkipReason),
}

/// Decision for a review-request event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewDecision {
    /// Move the linked task to a new status.
    SetStatus {
        /// Task named by the source branch.
        task_id: RemoteTaskId,
        /// Target lifecycle position.
        target: StatusTarget,
    },
    /// Do nothing.
    Skip(SkipReason),
}

/// Plans the `opened` flow.
///
/// # Errors
///
/// Returns [`SyncDomainError::MultipleTypeLabels`] when the ticket carries
/// more than one type label and no task is linked yet.
pub fn plan_opened(
    ticket: &Ticket,
    linked: Option<&RemoteTaskId>,
    policy: TagCasePolicy,
) -> Result<TicketDecision, SyncDomainError> {
    if !ticket.has_type_label() {
        return Ok(TicketDecision::RequestLabels);
    }
    if linked.is_some() {
        return Ok(TicketDecision::Skip(SkipReason::AlreadyLinked));
    }
    plan_creation(ticket, policy)
}

/// Plans the `labeled` flow for a single added label.
///
/// # Errors
///
/// Returns [`SyncDomainError::MultipleTypeLabels`] when the added label is a
/// type label, no task is linked, and the ticket now carries more than one
/// type label.
pub fn plan_labeled(
    ticket: &Ticket,
    added: &Label,
    linked: Option<&RemoteTaskId>,
    policy: TagCasePolicy,
) -> Result<TicketDecision, SyncDomainError> {
    if ticket.is_closed() {
        return Ok(TicketDecision::Skip(SkipReason::TicketClosed));
    }
    match (linked, added.class()) {
        (Some(task_id), LabelClass::Syncable) => Ok(TicketDecision::AddTag {
            task_id: task_id.clone(),
            tag: policy.apply(added.name()),
        }),
        (None, LabelClass::Type(_)) => plan_creation(ticket, policy),
        _ => Ok(TicketDecision::Skip(SkipReason::LabelNotActionable)),
    }
}

/// Plans the `closed` flow.
///
/// Closing completes the linked task whether or not the ticket was closed by
/// merging a linked review request.
#[must_use]
pub fn plan_closed(linked: Option<&RemoteTaskId>) -> TicketDecision {
    linked.map_or(
        TicketDecision::Skip(SkipReason::NoLinkedTask),
        |task_id| TicketDecision::CompleteTask {
            task_id: task_id.clone(),
        },
    )
}

/// Plans a review-request event.
#[must_use]
pub fn plan_review(review_request: &ReviewRequest, action: &ReviewAction) -> ReviewDecision {
    if review_request.is_draft() {
        return ReviewDecision::Skip(SkipReason::DraftReviewRequest);
    }
    task_id_from_branch(review_request.branch()).map_or(
        ReviewDecision::Skip(SkipReason::UnlinkedBranch),
        |task_id| ReviewDecision::SetStatus {
            task_id,
            target: action.status_target(),
        },
    )
}

fn plan_creation(
    ticket: &Ticket,
    policy: TagCasePolicy,
) -> Result<TicketDecision, SyncDomainError> {
    let kind = match resolve_kind(ticket.labels())? {
        TypeLabelState::Recognised(kind) => kind,
        TypeLabelState::Missing | TypeLabelState::Unrecognised(_) => {
            return Ok(TicketDecision::Skip(SkipReason::UnrecognisedTypeLabel));
        }
    };
    Ok(TicketDecision::CreateTask(TaskDraft {
        kind,
        name: ticket.task_title(),
        description: ticket.body().map(str::to_owned),
        tags: syncable_tags(ticket.labels(), policy),
    }))
}
