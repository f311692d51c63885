//! In-memory issue host recording comment threads.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::sync::{
    domain::{Comment, RepositoryFullName, TicketNumber},
    ports::{IssueHost, IssueHostError, IssueHostResult},
};

type ThreadKey = (RepositoryFullName, TicketNumber);

/// In-memory issue host.
///
/// Comment threads are kept per repository and number in creation order.
/// Comment creation can be made to fail to exercise error propagation.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIssueHost {
    state: Arc<RwLock<InMemoryIssueHostState>>,
}

#[derive(Debug, Default)]
struct InMemoryIssueHostState {
    threads: HashMap<ThreadKey, Vec<Comment>>,
    fail_comment_creation: bool,
}

impl InMemoryIssueHost {
    /// Creates a host with no comments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an existing comment on a ticket or review request.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn seed_comment(
        &self,
        repository: &RepositoryFullName,
        number: TicketNumber,
        comment: Comment,
    ) -> IssueHostResult<()> {
        let mut state = self.write()?;
        state
            .threads
            .entry((repository.clone(), number))
            .or_default()
            .push(comment);
        Ok(())
    }

    /// Makes subsequent comment creation fail with an HTTP 500.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn fail_comment_creation(&self) -> IssueHostResult<()> {
        self.write()?.fail_comment_creation = true;
        Ok(())
    }

    /// Returns the comment thread of a ticket or review request.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn thread(
        &self,
        repository: &RepositoryFullName,
        number: TicketNumber,
    ) -> IssueHostResult<Vec<Comment>> {
        let state = self.read()?;
        Ok(state
            .threads
            .get(&(repository.clone(), number))
            .cloned()
            .unwrap_or_default())
    }

    fn read(&self) -> IssueHostResult<std::sync::RwLockReadGuard<'_, InMemoryIssueHostState>> {
        self.state
            .read()
            .map_err(|err| IssueHostError::transport(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> IssueHostResult<std::sync::RwLockWriteGuard<'_, InMemoryIssueHostState>> {
        self.state
            .write()
            .map_err(|err| IssueHostError::transport(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl IssueHost for InMemoryIssueHost {
    async fn list_comments(
        &self,
        repository: &RepositoryFullName,
        number: TicketNumber,
    ) -> IssueHostResult<Vec<Comment>> {
        self.thread(repository, number)
    }

    async fn create_comment(
        &self,
        repository: &RepositoryFullName,
        number: TicketNumber,
        body: &str,
    ) -> IssueHostResult<()> {
        let mut state = self.write()?;
        if state.fail_comment_creation {
            return Err(IssueHostError::Http {
                status: 500,
                body: "comment creation disabled".to_owned(),
            });
        }
        state
            .threads
            .entry((repository.clone(), number))
            .or_default()
            .push(Comment::new(body));
        Ok(())
    }
}
