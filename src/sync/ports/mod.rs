//! Port contracts for ticket-to-task synchronisation.
//!
//! Ports define infrastructure-agnostic interfaces used by the sync services.

pub mod issue_host;
pub mod link_store;
pub mod renderer;
pub mod task_backend;

pub use issue_host::{IssueHost, IssueHostError, IssueHostResult};
pub use link_store::{TaskLinkStore, TaskLinkStoreError, TaskLinkStoreResult};
pub use renderer::{
    MessageRenderer, RenderError, TemplateName, encode_uri, task_context, ticket_context,
};
pub use task_backend::{TaskBackend, TaskBackendError, TaskBackendResult};

#[cfg(test)]
pub use issue_host::MockIssueHost;
#[cfg(test)]
pub use task_backend::MockTaskBackend;
