//! In-memory link store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::sync::{
    domain::{TaskLink, TicketRef},
    ports::{TaskLinkStore, TaskLinkStoreError, TaskLinkStoreResult},
};

/// Thread-safe in-memory link store.
///
/// Starts empty on every run, so lookups fall through to the comment scan
/// unless a link was recorded earlier in the same process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskLinkStore {
    links: Arc<RwLock<HashMap<TicketRef, TaskLink>>>,
}

impl InMemoryTaskLinkStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded link.
    ///
    /// # Errors
    ///
    /// Returns persistence errors when lock acquisition fails.
    pub fn links(&self) -> TaskLinkStoreResult<Vec<TaskLink>> {
        let links = self.links.read().map_err(|err| {
            TaskLinkStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(links.values().cloned().collect())
    }
}

#[async_trait]
impl TaskLinkStore for InMemoryTaskLinkStore {
    async fn find(&self, ticket: &TicketRef) -> TaskLinkStoreResult<Option<TaskLink>> {
        let links = self.links.read().map_err(|err| {
            TaskLinkStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(links.get(ticket).cloned())
    }

    async fn record(&self, link: &TaskLink) -> TaskLinkStoreResult<()> {
        let mut links = self.links.write().map_err(|err| {
            TaskLinkStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if links.contains_key(link.ticket()) {
            return Err(TaskLinkStoreError::AlreadyLinked(link.ticket().clone()));
        }
        links.insert(link.ticket().clone(), link.clone());
        Ok(())
    }
}
