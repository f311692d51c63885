//! In-memory adapters for tests and local replays.

mod issue_host;
mod link_store;
mod task_backend;

pub use issue_host::InMemoryIssueHost;
pub use link_store::InMemoryTaskLinkStore;
pub use task_backend::{InMemoryTaskBackend, RecordedTaskCall};
