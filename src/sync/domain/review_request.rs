//! Review-request value objects: source branch, action and draft state.

use super::{StatusTarget, SyncDomainError, TicketNumber};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source branch name of a review request.
///
/// # Examples
///
///     use tasklink::sync::domain::BranchName;
///
///     let name = BranchName::new(" feature/CU-99 ").expect("valid");
///     assert_eq!(name.as_str(), "feature/CU-99");
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchName(String);

impl BranchName {
    /// Creates a validated branch name.
    ///
    /// # Errors
    ///
    /// Returns [`SyncDomainError::EmptyBranchName`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, SyncDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(SyncDomainError::EmptyBranchName);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the branch name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle action reported for a review request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReviewAction {
    /// The review request was opened.
    Opened,
    /// A closed review request was reopened.
    Reopened,
    /// A draft review request was marked ready for review.
    ReadyForReview,
    /// The review request was closed, merged or not.
    Closed,
    /// Any other action (`synchronize`, `edited`, `labeled`, ...).
    Other(String),
}

impl ReviewAction {
    /// Returns the action name as reported by the issue host.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Opened => "opened",
            Self::Reopened => "reopened",
            Self::ReadyForReview => "ready_for_review",
            Self::Closed => "closed",
            Self::Other(action) => action,
        }
    }

    /// Returns the task status this action moves the linked task to.
    ///
    /// Opening, reopening and marking ready put the task in review; every
    /// other action completes it.
    #[must_use]
    pub const fn status_target(&self) -> StatusTarget {
        match self {
            Self::Opened | Self::Reopened | Self::ReadyForReview => StatusTarget::InReview,
            Self::Closed | Self::Other(_) => StatusTarget::Done,
        }
    }
}

impl From<&str> for ReviewAction {
    fn from(value: &str) -> Self {
        match value {
            "opened" => Self::Opened,
            "reopened" => Self::Reopened,
            "ready_for_review" => Self::ReadyForReview,
            "closed" => Self::Closed,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Code-review request as delivered with a lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    number: TicketNumber,
    branch: BranchName,
    draft: bool,
    html_url: Option<String>,
}

impl ReviewRequest {
    /// Creates a review request for the given source branch.
    #[must_use]
    pub const fn new(number: TicketNumber, branch: BranchName, draft: bool) -> Self {
        Self {
            number,
            branch,
            draft,
            html_url: None,
        }
    }

    /// Sets the browser URL of the review request.
    #[must_use]
    pub fn with_html_url(mut self, html_url: impl Into<String>) -> Self {
        self.html_url = Some(html_url.into());
        self
    }

    /// Returns the review request number.
    #[must_use]
    pub const fn number(&self) -> TicketNumber {
        self.number
    }

    /// Returns the source branch.
    #[must_use]
    pub const fn branch(&self) -> &BranchName {
        &self.branch
    }

    /// Returns `true` for draft review requests.
    #[must_use]
    pub const fn is_draft(&self) -> bool {
        self.draft
    }

    /// Returns the browser URL of the review request.
    #[must_use]
    pub fn html_url(&self) -> Option<&str> {
        self.html_url.as_deref()
    }
}
