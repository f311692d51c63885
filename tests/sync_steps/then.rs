//! Then steps for synchronisation BDD scenarios.

use super::world::SyncWorld;
use eyre::WrapErr;
use rstest_bdd_macros::then;
use tasklink::sync::{
    adapters::memory::RecordedTaskCall,
    domain::{Comment, RemoteTaskId, ReviewRequest, SyncDomainError, Ticket, TicketNumber},
    services::{SyncOutcome, SyncServiceError},
};

fn parse_task_id(value: String) -> Result<RemoteTaskId, eyre::Report> {
    RemoteTaskId::new(value).wrap_err("task id")
}

fn succeeded(world: &SyncWorld) -> Result<&SyncOutcome, eyre::Report> {
    world
        .last_result()?
        .as_ref()
        .map(|report| &report.outcome)
        .map_err(|err| eyre::eyre!("unexpected sync failure: {err}"))
}

fn thread_bodies(world: &SyncWorld, number: TicketNumber) -> Result<Vec<String>, eyre::Report> {
    Ok(world
        .issue_host
        .thread(&world.repository, number)
        .wrap_err("read comment thread")?
        .iter()
        .filter_map(Comment::body)
        .map(str::to_owned)
        .collect())
}

#[then(r#"the issue receives a comment containing "{text}""#)]
fn issue_comment_contains(world: &SyncWorld, text: String) -> Result<(), eyre::Report> {
    succeeded(world)?;
    let number = world
        .ticket
        .as_ref()
        .map(Ticket::number)
        .ok_or_else(|| eyre::eyre!("missing issue in scenario world"))?;
    let bodies = thread_bodies(world, number)?;
    if !bodies.iter().any(|body| body.contains(&text)) {
        return Err(eyre::eyre!("no issue comment contains {text:?}: {bodies:?}"));
    }
    Ok(())
}

fn assert_created(
    world: &SyncWorld,
    list: &str,
    expected_tags: &[String],
) -> Result<(), eyre::Report> {
    if !matches!(succeeded(world)?, SyncOutcome::TaskCreated(_)) {
        return Err(eyre::eyre!("expected a created task"));
    }
    let calls = world.backend.calls().wrap_err("read backend calls")?;
    let created = calls.iter().any(|call| {
        matches!(
            call,
            RecordedTaskCall::CreateTask { list: target, task }
                if target.as_str() == list && task.tags == expected_tags
        )
    });
    if !created {
        return Err(eyre::eyre!(
            "no task created in list {list} with tags {expected_tags:?}: {calls:?}"
        ));
    }
    Ok(())
}

#[then(r#"a task is created in list "{list}" with tags "{tags}""#)]
fn task_created_with_tags(
    world: &SyncWorld,
    list: String,
    tags: String,
) -> Result<(), eyre::Report> {
    let expected_tags: Vec<String> = tags
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect();
    assert_created(world, &list, &expected_tags)
}

#[then(r#"a task is created in list "{list}" without tags"#)]
fn task_created_without_tags(world: &SyncWorld, list: String) -> Result<(), eyre::Report> {
    assert_created(world, &list, &[])
}

#[then(r#"the task "{id}" has a comment containing "{text}""#)]
fn task_comment_contains(world: &SyncWorld, id: String, text: String) -> Result<(), eyre::Report> {
    let comments = world
        .backend
        .task_comments(&parse_task_id(id)?)
        .wrap_err("read task comments")?;
    if !comments.iter().any(|comment| comment.contains(&text)) {
        return Err(eyre::eyre!("no task comment contains {text:?}: {comments:?}"));
    }
    Ok(())
}

#[then(r#"the task "{id}" carries the tag "{tag}""#)]
fn task_carries_tag(world: &SyncWorld, id: String, tag: String) -> Result<(), eyre::Report> {
    succeeded(world)?;
    let (_, task) = world
        .backend
        .task(&parse_task_id(id)?)
        .wrap_err("read task")?
        .ok_or_else(|| eyre::eyre!("task does not exist"))?;
    if !task.tags.contains(&tag) {
        return Err(eyre::eyre!("task tags {:?} lack {tag:?}", task.tags));
    }
    Ok(())
}

#[then(r#"the task "{id}" is in status "{status}""#)]
fn task_in_status(world: &SyncWorld, id: String, status: String) -> Result<(), eyre::Report> {
    succeeded(world)?;
    let (_, task) = world
        .backend
        .task(&parse_task_id(id)?)
        .wrap_err("read task")?
        .ok_or_else(|| eyre::eyre!("task does not exist"))?;
    if task.status.name != status {
        return Err(eyre::eyre!(
            "expected status {status:?}, found {:?}",
            task.status.name
        ));
    }
    Ok(())
}

#[then(r#"the pull request receives the comment "{text}""#)]
fn pull_request_comment(world: &SyncWorld, text: String) -> Result<(), eyre::Report> {
    let number = world
        .review_request
        .as_ref()
        .map(ReviewRequest::number)
        .ok_or_else(|| eyre::eyre!("missing pull request in scenario world"))?;
    let bodies = thread_bodies(world, number)?;
    if bodies != [text.clone()] {
        return Err(eyre::eyre!("expected only {text:?}, found {bodies:?}"));
    }
    Ok(())
}

#[then(r#"the run is skipped because "{reason}""#)]
fn run_skipped(world: &SyncWorld, reason: String) -> Result<(), eyre::Report> {
    match succeeded(world)? {
        SyncOutcome::Skipped(skip) if skip.as_str() == reason => Ok(()),
        other => Err(eyre::eyre!("expected skip {reason:?}, found {other:?}")),
    }
}

#[then("the run fails because the issue has several type labels")]
fn run_fails_with_type_labels(world: &SyncWorld) -> Result<(), eyre::Report> {
    let result = world.last_result()?;
    if !matches!(
        result,
        Err(SyncServiceError::Domain(SyncDomainError::MultipleTypeLabels(_)))
    ) {
        return Err(eyre::eyre!("expected multiple type labels error, got {result:?}"));
    }
    Ok(())
}

#[then("the issue comment count is {count:usize}")]
fn issue_thread_length(world: &SyncWorld, count: usize) -> Result<(), eyre::Report> {
    let number = world
        .ticket
        .as_ref()
        .map(Ticket::number)
        .ok_or_else(|| eyre::eyre!("missing issue in scenario world"))?;
    let thread = world
        .issue_host
        .thread(&world.repository, number)
        .wrap_err("read comment thread")?;
    if thread.len() != count {
        return Err(eyre::eyre!(
            "expected {count} issue comments, found {}",
            thread.len()
        ));
    }
    Ok(())
}

#[then("no task is created")]
fn no_task_created(world: &SyncWorld) -> Result<(), eyre::Report> {
    succeeded(world)?;
    let calls = world.backend.calls().wrap_err("read backend calls")?;
    if calls
        .iter()
        .any(|call| matches!(call, RecordedTaskCall::CreateTask { .. }))
    {
        return Err(eyre::eyre!("expected no created task, found {calls:?}"));
    }
    Ok(())
}

#[then("no task backend call is made")]
fn no_backend_call(world: &SyncWorld) -> Result<(), eyre::Report> {
    let calls = world.backend.calls().wrap_err("read backend calls")?;
    if !calls.is_empty() {
        return Err(eyre::eyre!("expected no backend calls, found {calls:?}"));
    }
    Ok(())
}
