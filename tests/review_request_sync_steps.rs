//! Behaviour tests for branch-linked pull request status transitions.

#[path = "sync_steps/mod.rs"]
mod sync_steps_defs;

use rstest_bdd_macros::scenario;
use sync_steps_defs::world::{SyncWorld, world};

#[scenario(
    path = "tests/features/review_request_sync.feature",
    name = "Move the task to review when a pull request is opened"
)]
#[tokio::test(flavor = "multi_thread")]
async fn opened_pull_request_moves_task_to_review(world: SyncWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/review_request_sync.feature",
    name = "Complete the task when a pull request is closed"
)]
#[tokio::test(flavor = "multi_thread")]
async fn closed_pull_request_completes_task(world: SyncWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/review_request_sync.feature",
    name = "Ignore draft pull requests"
)]
#[tokio::test(flavor = "multi_thread")]
async fn draft_pull_request_is_ignored(world: SyncWorld) {
    let _ = world;
}
