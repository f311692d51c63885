//! Domain model for ticket-to-task synchronisation.
//!
//! The domain models tickets, review requests, the label taxonomy, link
//! resolution and the pure decision rules, while keeping every remote call
//! outside of the domain boundary.

mod decision;
mod error;
mod event;
mod ids;
mod label;
mod link;
mod remote_task;
mod review_request;
mod ticket;

pub use decision::{
    ReviewDecision, SkipReason, TicketDecision, plan_closed, plan_labeled, plan_opened,
    plan_review,
};
pub use error::{ParseTagCasePolicyError, SyncDomainError};
pub use event::{EventContext, SyncEvent, TicketAction};
pub use ids::{RemoteTaskId, RepositoryFullName, TaskListId, TicketNumber};
pub use label::{
    Label, LabelClass, TagCasePolicy, TaskKind, TypeLabelState, classify_type, is_syncable,
    is_type_label, resolve_kind, syncable_tags,
};
pub use link::{
    BranchConvention, CommentMarkers, TaskLink, TaskLinkSource, resolve_linked_task,
    task_id_from_branch,
};
pub use remote_task::{
    NewTask, RemoteTask, StatusTarget, StatusVocabulary, TaskDraft, TaskStatus,
};
pub use review_request::{BranchName, ReviewAction, ReviewRequest};
pub use ticket::{Comment, Ticket, TicketRef};
