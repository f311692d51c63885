//! Run outcomes and best-effort effects.

use crate::sync::domain::{RemoteTask, RemoteTaskId, SkipReason};
use std::fmt;

/// Side effect attempted after the primary effect of a run has committed.
///
/// Failures never fail the run; they are reported as [`Diagnostic`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BestEffortEffect {
    /// Comment on the task pointing back at the originating ticket.
    LinkBack {
        /// Task to annotate.
        task_id: RemoteTaskId,
        /// Browser URL of the ticket.
        url: String,
    },
}

impl BestEffortEffect {
    /// Returns a stable name for logs and diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LinkBack { .. } => "link_back",
        }
    }
}

/// A recovered failure of a best-effort effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Effect name, see [`BestEffortEffect::name`].
    pub effect: &'static str,
    /// Task the effect concerned.
    pub task_id: RemoteTaskId,
    /// Failure description.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} for task {} failed: {}", self.effect, self.task_id, self.message)
    }
}

/// Primary result of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A task was created and linked to the ticket.
    TaskCreated(RemoteTask),
    /// A tag was attached to the linked task.
    TagAdded {
        /// Linked task.
        task_id: RemoteTaskId,
        /// Applied tag.
        tag: String,
    },
    /// The backend refused the tag; the run still succeeds.
    TagRejected {
        /// Linked task.
        task_id: RemoteTaskId,
        /// Refused tag.
        tag: String,
        /// Backend error text.
        reason: String,
    },
    /// The linked task moved to a new status.
    StatusChanged(RemoteTask),
    /// The reporter was asked to add a type label.
    LabelsRequested,
    /// Nothing was changed.
    Skipped(SkipReason),
}

/// Outcome of a run plus the diagnostics of its best-effort effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Primary result.
    pub outcome: SyncOutcome,
    /// Recovered best-effort failures.
    pub diagnostics: Vec<Diagnostic>,
}

impl SyncReport {
    /// Creates a report without diagnostics.
    #[must_use]
    pub const fn new(outcome: SyncOutcome) -> Self {
        Self {
            outcome,
            diagnostics: Vec::new(),
        }
    }

    /// Creates a report for a skipped event.
    #[must_use]
    pub const fn skipped(reason: SkipReason) -> Self {
        Self::new(SyncOutcome::Skipped(reason))
    }

    /// Attaches diagnostics.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Vec<Diagnostic>) -> Self {
        self.diagnostics = diagnostics;
        self
    }
}
