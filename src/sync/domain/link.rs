//! Ticket-to-task link resolution.
//!
//! A ticket's task is referenced by a `CU-<task-id>` marker in one of its
//! comments; a review request's task is referenced by a `feature/CU-<task-id>`
//! source branch. Both sources share one marker grammar and are exposed
//! through [`TaskLinkSource`].

use super::{BranchName, Comment, RemoteTaskId, TicketRef};
use chrono::{DateTime, Utc};
use mockable::Clock;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static COMMENT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i-u)CU-([a-z0-9]+)").expect("valid marker pattern"));

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static BRANCH_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i-u)feature/CU-([a-z0-9]+)").expect("valid branch pattern")
});

/// A source from which a linked remote task can be resolved.
pub trait TaskLinkSource {
    /// Returns the linked task identifier, if the source carries one.
    fn resolve(&self) -> Option<RemoteTaskId>;
}

/// Comment-history link source.
///
/// Scans comments in creation order and returns the first marker found.
/// Comments without a body are skipped. The scan is purely syntactic and
/// never confirms that the task still exists.
#[derive(Debug, Clone, Copy)]
pub struct CommentMarkers<'a> {
    comments: &'a [Comment],
}

impl<'a> CommentMarkers<'a> {
    /// Wraps a comment history in creation order.
    #[must_use]
    pub const fn new(comments: &'a [Comment]) -> Self {
        Self { comments }
    }
}

impl TaskLinkSource for CommentMarkers<'_> {
    fn resolve(&self) -> Option<RemoteTaskId> {
        self.comments
            .iter()
            .filter_map(Comment::body)
            .find_map(|body| capture_task_id(&COMMENT_MARKER, body))
    }
}

/// Branch-naming link source for review requests.
///
/// Matches `feature/CU-<task-id>` anywhere in the branch name,
/// case-insensitively.
#[derive(Debug, Clone, Copy)]
pub struct BranchConvention<'a> {
    branch: &'a BranchName,
}

impl<'a> BranchConvention<'a> {
    /// Wraps a review request source branch.
    #[must_use]
    pub const fn new(branch: &'a BranchName) -> Self {
        Self { branch }
    }
}

impl TaskLinkSource for BranchConvention<'_> {
    fn resolve(&self) -> Option<RemoteTaskId> {
        capture_task_id(&BRANCH_MARKER, self.branch.as_str())
    }
}

/// Resolves the linked task from a ticket's comment history.
///
/// # Examples
///
///     use tasklink::sync::domain::{Comment, resolve_linked_task};
///
///     let comments = vec![
///         Comment::new("Thanks for the report"),
///         Comment::new("Created a task: [cu-42](https://example.test/t/42)"),
///     ];
///     let task_id = resolve_linked_task(&comments).expect("linked");
///     assert_eq!(task_id.as_str(), "42");
#[must_use]
pub fn resolve_linked_task(comments: &[Comment]) -> Option<RemoteTaskId> {
    CommentMarkers::new(comments).resolve()
}

/// Resolves the linked task from a review request's source branch.
#[must_use]
pub fn task_id_from_branch(branch: &BranchName) -> Option<RemoteTaskId> {
    BranchConvention::new(branch).resolve()
}

fn capture_task_id(pattern: &Regex, haystack: &str) -> Option<RemoteTaskId> {
    pattern
        .captures(haystack)
        .and_then(|captures| captures.get(1))
        .and_then(|id| RemoteTaskId::new(id.as_str()).ok())
}

/// Explicit ticket-to-task link kept by a link store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskLink {
    ticket: TicketRef,
    task_id: RemoteTaskId,
    linked_at: DateTime<Utc>,
}

impl TaskLink {
    /// Records a link established now.
    #[must_use]
    pub fn new(ticket: TicketRef, task_id: RemoteTaskId, clock: &impl Clock) -> Self {
        Self {
            ticket,
            task_id,
            linked_at: clock.utc(),
        }
    }

    /// Returns the linked ticket.
    #[must_use]
    pub const fn ticket(&self) -> &TicketRef {
        &self.ticket
    }

    /// Returns the linked remote task.
    #[must_use]
    pub const fn task_id(&self) -> &RemoteTaskId {
        &self.task_id
    }

    /// Returns when the link was established.
    #[must_use]
    pub const fn linked_at(&self) -> DateTime<Utc> {
        self.linked_at
    }
}
