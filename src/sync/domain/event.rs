//! Inbound lifecycle events, passed explicitly into every handler.

use super::{Label, RepositoryFullName, ReviewAction, ReviewRequest, Ticket, TicketRef};

/// Ticket lifecycle action handled by synchronisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketAction {
    /// The ticket was opened.
    Opened,
    /// A single label was added; carries that label.
    Labeled(Label),
    /// The ticket was closed.
    Closed,
}

impl TicketAction {
    /// Returns the action name as reported by the issue host.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Opened => "opened",
            Self::Labeled(_) => "labeled",
            Self::Closed => "closed",
        }
    }
}

/// Classified inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// Ticket lifecycle event.
    Ticket {
        /// Handled ticket action.
        action: TicketAction,
        /// Ticket with its labels at event time.
        ticket: Ticket,
    },
    /// Review-request lifecycle event.
    ReviewRequest {
        /// Review action.
        action: ReviewAction,
        /// Review request at event time.
        review_request: ReviewRequest,
    },
    /// Event or action outside the handled set.
    Unhandled {
        /// Event name.
        event_name: String,
        /// Action, when the payload carries one.
        action: Option<String>,
    },
}

/// Explicit event context: repository coordinates plus the classified event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventContext {
    repository: RepositoryFullName,
    event: SyncEvent,
}

impl EventContext {
    /// Creates an event context.
    #[must_use]
    pub const fn new(repository: RepositoryFullName, event: SyncEvent) -> Self {
        Self { repository, event }
    }

    /// Returns the repository the event originated from.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryFullName {
        &self.repository
    }

    /// Returns the classified event.
    #[must_use]
    pub const fn event(&self) -> &SyncEvent {
        &self.event
    }

    /// Returns the repository-scoped reference of the ticket, when the event
    /// concerns one.
    #[must_use]
    pub fn ticket_ref(&self) -> Option<TicketRef> {
        match &self.event {
            SyncEvent::Ticket { ticket, .. } => {
                Some(TicketRef::new(self.repository.clone(), ticket.number()))
            }
            SyncEvent::ReviewRequest { .. } | SyncEvent::Unhandled { .. } => None,
        }
    }
}
