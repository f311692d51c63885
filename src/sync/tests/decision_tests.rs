//! Tests for the pure ticket and review-request planners.

use chrono::{TimeZone, Utc};
use rstest::rstest;

use super::fixtures::{label, review_request, task_id, ticket};
use crate::sync::domain::{
    ReviewAction, ReviewDecision, SkipReason, StatusTarget, SyncDomainError, TagCasePolicy,
    TaskDraft, TaskKind, TicketDecision, plan_closed, plan_labeled, plan_opened, plan_review,
};

#[rstest]
fn opened_without_type_label_requests_labels() {
    let decision = plan_opened(&ticket(&["target: web"]), None, TagCasePolicy::Lowercase);

    assert_eq!(decision, Ok(TicketDecision::RequestLabels));
}

#[rstest]
fn opened_with_problem_label_creates_problem_task() {
    let decision = plan_opened(
        &ticket(&["type: bug", "Platform: x", "target: Web"]),
        None,
        TagCasePolicy::Lowercase,
    );

    assert_eq!(
        decision,
        Ok(TicketDecision::CreateTask(TaskDraft {
            kind: TaskKind::Problem,
            name: "Crash on save".to_owned(),
            description: Some("Steps to reproduce".to_owned()),
            tags: vec!["target: web".to_owned()],
        }))
    );
}

#[rstest]
fn opened_with_linked_task_is_skipped() {
    let linked = task_id("7");
    let decision = plan_opened(
        &ticket(&["type: suggestion"]),
        Some(&linked),
        TagCasePolicy::Lowercase,
    );

    assert_eq!(decision, Ok(TicketDecision::Skip(SkipReason::AlreadyLinked)));
}

#[rstest]
fn opened_with_two_type_labels_is_refused() {
    let decision = plan_opened(
        &ticket(&["type: bug", "type: chore"]),
        None,
        TagCasePolicy::Lowercase,
    );

    assert!(matches!(
        decision,
        Err(SyncDomainError::MultipleTypeLabels(names)) if names.len() == 2
    ));
}

#[rstest]
fn opened_with_unrecognised_type_label_creates_nothing() {
    let decision = plan_opened(&ticket(&["type: question"]), None, TagCasePolicy::Lowercase);

    assert_eq!(
        decision,
        Ok(TicketDecision::Skip(SkipReason::UnrecognisedTypeLabel))
    );
}

#[rstest]
#[case(TagCasePolicy::Lowercase, "platform: ios")]
#[case(TagCasePolicy::Preserve, "platform: iOS")]
fn labeled_syncable_on_linked_ticket_adds_tag(
    #[case] policy: TagCasePolicy,
    #[case] expected_tag: &str,
) {
    let linked = task_id("7");
    let decision = plan_labeled(
        &ticket(&["type: bug", "platform: iOS"]),
        &label("platform: iOS"),
        Some(&linked),
        policy,
    );

    assert_eq!(
        decision,
        Ok(TicketDecision::AddTag {
            task_id: linked,
            tag: expected_tag.to_owned(),
        })
    );
}

#[rstest]
fn labeled_type_on_unlinked_ticket_creates_task_with_current_tags() {
    let decision = plan_labeled(
        &ticket(&["target: api", "type: suggestion"]),
        &label("type: suggestion"),
        None,
        TagCasePolicy::Lowercase,
    );

    assert!(matches!(
        decision,
        Ok(TicketDecision::CreateTask(TaskDraft { kind: TaskKind::Feature, ref tags, .. }))
            if tags == &vec!["target: api".to_owned()]
    ));
}

#[rstest]
fn labeled_second_type_label_on_unlinked_ticket_is_refused() {
    let decision = plan_labeled(
        &ticket(&["type: bug", "type: suggestion"]),
        &label("type: suggestion"),
        None,
        TagCasePolicy::Lowercase,
    );

    assert!(matches!(decision, Err(SyncDomainError::MultipleTypeLabels(_))));
}

#[rstest]
#[case(&["type: bug", "target: web"], "target: web", None)]
#[case(&["type: bug", "type: chore"], "type: chore", Some("7"))]
#[case(&["type: bug", "wontfix"], "wontfix", Some("7"))]
fn labeled_without_matching_rule_is_not_actionable(
    #[case] labels: &[&str],
    #[case] added: &str,
    #[case] linked: Option<&str>,
) {
    let linked_id = linked.map(task_id);
    let decision = plan_labeled(
        &ticket(labels),
        &label(added),
        linked_id.as_ref(),
        TagCasePolicy::Lowercase,
    );

    assert_eq!(
        decision,
        Ok(TicketDecision::Skip(SkipReason::LabelNotActionable))
    );
}

#[rstest]
fn labeled_closed_ticket_is_skipped() {
    let closed_at = Utc.with_ymd_and_hms(2026, 1, 5, 10, 0, 0).single().expect("valid time");
    let closed = ticket(&["type: bug", "target: web"]).with_closed_at(closed_at);
    let linked = task_id("7");

    let decision = plan_labeled(
        &closed,
        &label("target: web"),
        Some(&linked),
        TagCasePolicy::Lowercase,
    );

    assert_eq!(decision, Ok(TicketDecision::Skip(SkipReason::TicketClosed)));
}

#[rstest]
fn closed_completes_linked_task_or_skips() {
    let linked = task_id("7");

    assert_eq!(
        plan_closed(Some(&linked)),
        TicketDecision::CompleteTask { task_id: linked }
    );
    assert_eq!(
        plan_closed(None),
        TicketDecision::Skip(SkipReason::NoLinkedTask)
    );
}

#[rstest]
#[case("opened", StatusTarget::InReview)]
#[case("reopened", StatusTarget::InReview)]
#[case("ready_for_review", StatusTarget::InReview)]
#[case("closed", StatusTarget::Done)]
#[case("synchronize", StatusTarget::Done)]
fn review_action_selects_status(#[case] action: &str, #[case] target: StatusTarget) {
    let decision = plan_review(
        &review_request("feature/CU-99", false),
        &ReviewAction::from(action),
    );

    assert_eq!(
        decision,
        ReviewDecision::SetStatus {
            task_id: task_id("99"),
            target,
        }
    );
}

#[rstest]
#[case("feature/CU-99")]
#[case("main")]
fn draft_review_request_is_always_skipped(#[case] branch: &str) {
    let decision = plan_review(&review_request(branch, true), &ReviewAction::Opened);

    assert_eq!(
        decision,
        ReviewDecision::Skip(SkipReason::DraftReviewRequest)
    );
}

#[rstest]
fn review_request_without_task_branch_is_skipped() {
    let decision = plan_review(&review_request("fix/typo", false), &ReviewAction::Closed);

    assert_eq!(decision, ReviewDecision::Skip(SkipReason::UnlinkedBranch));
}
