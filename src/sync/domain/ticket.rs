//! Ticket and comment value objects read from the issue tracker.

use super::{Label, RepositoryFullName, TicketNumber, is_type_label};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Repository-scoped reference to a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketRef {
    repository: RepositoryFullName,
    number: TicketNumber,
}

impl TicketRef {
    /// Creates a ticket reference from validated components.
    #[must_use]
    pub const fn new(repository: RepositoryFullName, number: TicketNumber) -> Self {
        Self { repository, number }
    }

    /// Returns the repository identifier.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryFullName {
        &self.repository
    }

    /// Returns the ticket number.
    #[must_use]
    pub const fn number(&self) -> TicketNumber {
        self.number
    }
}

impl fmt::Display for TicketRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.repository, self.number)
    }
}

/// Issue-tracker ticket as delivered with a lifecycle event.
///
/// Tickets are read-only to synchronisation; their label set is the one
/// current at the time the event was emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    number: TicketNumber,
    title: String,
    body: Option<String>,
    html_url: Option<String>,
    closed_at: Option<DateTime<Utc>>,
    labels: Vec<Label>,
}

impl Ticket {
    /// Creates a ticket with the given number and title.
    #[must_use]
    pub fn new(number: TicketNumber, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into().trim().to_owned(),
            body: None,
            html_url: None,
            closed_at: None,
            labels: Vec::new(),
        }
    }

    /// Sets the free-text body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        let value = body.into();
        self.body = (!value.trim().is_empty()).then_some(value);
        self
    }

    /// Sets the browser URL of the ticket.
    #[must_use]
    pub fn with_html_url(mut self, html_url: impl Into<String>) -> Self {
        self.html_url = Some(html_url.into());
        self
    }

    /// Marks the ticket as closed at the given time.
    #[must_use]
    pub const fn with_closed_at(mut self, closed_at: DateTime<Utc>) -> Self {
        self.closed_at = Some(closed_at);
        self
    }

    /// Sets the currently applied labels, preserving order.
    #[must_use]
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = Label>) -> Self {
        self.labels = labels.into_iter().collect();
        self
    }

    /// Returns the ticket number.
    #[must_use]
    pub const fn number(&self) -> TicketNumber {
        self.number
    }

    /// Returns the ticket title, which may be empty.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the ticket body.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Returns the browser URL of the ticket.
    #[must_use]
    pub fn html_url(&self) -> Option<&str> {
        self.html_url.as_deref()
    }

    /// Returns whether any label carries the type prefix, recognised or not.
    #[must_use]
    pub fn has_type_label(&self) -> bool {
        self.labels.iter().any(|label| is_type_label(label.name()))
    }

    /// Returns the closing timestamp when the ticket is closed.
    #[must_use]
    pub const fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    /// Returns `true` when the ticket has been closed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed_at.is_some()
    }

    /// Returns the currently applied labels.
    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Returns the name a remote task created for this ticket should carry.
    ///
    /// Falls back to `Issue #<number>` when the title is empty.
    #[must_use]
    pub fn task_title(&self) -> String {
        if self.title.is_empty() {
            format!("Issue #{}", self.number)
        } else {
            self.title.clone()
        }
    }
}

/// Comment on a ticket or review request, in creation order.
///
/// The issue host may return comments without a body; those never carry a
/// link marker and are skipped by link resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    body: Option<String>,
}

impl Comment {
    /// Creates a comment with the given body.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
        }
    }

    /// Creates a comment whose body is missing.
    #[must_use]
    pub const fn without_body() -> Self {
        Self { body: None }
    }

    /// Returns the comment body, if present.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}
