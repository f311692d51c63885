//! Shared builders for sync unit tests.

use rstest::fixture;

use crate::sync::{
    domain::{
        BranchName, Label, RemoteTaskId, RepositoryFullName, ReviewRequest, StatusVocabulary,
        TagCasePolicy, TaskListId, Ticket, TicketNumber,
    },
    services::{SyncSettings, TaskQueues},
};

pub(super) const PROBLEM_LIST: &str = "900";
pub(super) const FEATURE_LIST: &str = "901";

pub(super) fn repository() -> RepositoryFullName {
    RepositoryFullName::new("acme/widgets").expect("valid repository")
}

pub(super) fn number(value: u64) -> TicketNumber {
    TicketNumber::new(value).expect("valid ticket number")
}

pub(super) fn task_id(value: &str) -> RemoteTaskId {
    RemoteTaskId::new(value).expect("valid task id")
}

pub(super) fn label(name: &str) -> Label {
    Label::new(name).expect("valid label")
}

pub(super) fn ticket(labels: &[&str]) -> Ticket {
    Ticket::new(number(12), "Crash on save")
        .with_body("Steps to reproduce")
        .with_html_url("https://github.com/acme/widgets/issues/12")
        .with_labels(labels.iter().map(|name| label(name)))
}

pub(super) fn review_request(branch: &str, draft: bool) -> ReviewRequest {
    ReviewRequest::new(
        number(31),
        BranchName::new(branch).expect("valid branch"),
        draft,
    )
}

#[fixture]
pub(super) fn queues() -> TaskQueues {
    TaskQueues::new(
        TaskListId::new(PROBLEM_LIST).expect("valid list"),
        TaskListId::new(FEATURE_LIST).expect("valid list"),
    )
}

pub(super) fn settings() -> SyncSettings {
    SyncSettings {
        queues: queues(),
        vocabulary: StatusVocabulary::default(),
        tag_case: TagCasePolicy::Lowercase,
    }
}
