//! Service-level errors.

use crate::sync::{
    domain::SyncDomainError,
    ports::{IssueHostError, RenderError, TaskBackendError, TaskLinkStoreError},
};
use thiserror::Error;

/// Errors that fail a synchronisation run.
#[derive(Debug, Error)]
pub enum SyncServiceError {
    /// Domain validation failed, e.g. more than one type label.
    #[error(transparent)]
    Domain(#[from] SyncDomainError),
    /// Issue host call failed.
    #[error(transparent)]
    IssueHost(#[from] IssueHostError),
    /// Task backend call failed on the primary path.
    #[error(transparent)]
    TaskBackend(#[from] TaskBackendError),
    /// Link store lookup or write failed.
    #[error(transparent)]
    LinkStore(#[from] TaskLinkStoreError),
    /// Message rendering failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Result type for synchronisation services.
pub type SyncServiceResult<T> = Result<T, SyncServiceError>;
