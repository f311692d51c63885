//! Issue host port: comment history and comment creation on tickets and
//! review requests.

use crate::sync::domain::{Comment, RepositoryFullName, TicketNumber};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for issue host operations.
pub type IssueHostResult<T> = Result<T, IssueHostError>;

/// Issue-tracker contract.
///
/// Tickets and review requests share one number space, so both operations
/// accept either.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueHost: Send + Sync {
    /// Lists every comment on a ticket or review request in creation order.
    async fn list_comments(
        &self,
        repository: &RepositoryFullName,
        number: TicketNumber,
    ) -> IssueHostResult<Vec<Comment>>;

    /// Appends a comment to a ticket or review request.
    async fn create_comment(
        &self,
        repository: &RepositoryFullName,
        number: TicketNumber,
        body: &str,
    ) -> IssueHostResult<()>;
}

/// Errors returned by issue host implementations.
#[derive(Debug, Clone, Error)]
pub enum IssueHostError {
    /// The issue host answered with a non-success status.
    #[error("issue host returned HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The response could not be decoded.
    #[error("failed to decode issue host response: {0}")]
    Decode(String),

    /// Transport-level failure.
    #[error("issue host transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl IssueHostError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
