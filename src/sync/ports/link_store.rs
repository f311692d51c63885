//! Link store port: explicit ticket-to-task mapping.

use crate::sync::domain::{TaskLink, TicketRef};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for link store operations.
pub type TaskLinkStoreResult<T> = Result<T, TaskLinkStoreError>;

/// Ticket-to-task link persistence contract.
///
/// A ticket maps to at most one task. The comment marker stays the
/// human-readable trace of a link; the store answers lookups without
/// scanning comments.
#[async_trait]
pub trait TaskLinkStore: Send + Sync {
    /// Finds the link recorded for a ticket.
    ///
    /// Returns `None` when no link has been recorded.
    async fn find(&self, ticket: &TicketRef) -> TaskLinkStoreResult<Option<TaskLink>>;

    /// Records a new link.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLinkStoreError::AlreadyLinked`] when the ticket already
    /// maps to a task.
    async fn record(&self, link: &TaskLink) -> TaskLinkStoreResult<()>;
}

/// Errors returned by link store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskLinkStoreError {
    /// The ticket already maps to a task.
    #[error("ticket {0} is already linked to a task")]
    AlreadyLinked(TicketRef),

    /// Persistence-layer failure.
    #[error("link store persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskLinkStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
