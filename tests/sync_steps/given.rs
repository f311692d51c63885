//! Given steps for synchronisation BDD scenarios.

use super::world::SyncWorld;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use tasklink::sync::domain::{
    BranchName, Comment, Label, RemoteTaskId, ReviewRequest, Ticket, TicketNumber,
};

fn parse_labels(labels: &str) -> Result<Vec<Label>, eyre::Report> {
    labels
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| Label::new(name).wrap_err_with(|| format!("invalid label {name:?}")))
        .collect()
}

#[given(r#"an open issue #{number:u64} titled "{title}" with labels "{labels}""#)]
fn open_issue(
    world: &mut SyncWorld,
    number: u64,
    title: String,
    labels: String,
) -> Result<(), eyre::Report> {
    let url = format!("https://github.com/{}/issues/{number}", world.repository);
    let ticket = Ticket::new(TicketNumber::new(number).wrap_err("issue number")?, title)
        .with_body("Steps to reproduce")
        .with_html_url(url)
        .with_labels(parse_labels(&labels)?);
    world.ticket = Some(ticket);
    Ok(())
}

#[given(r#"the issue has a comment "{body}""#)]
fn issue_comment(world: &mut SyncWorld, body: String) -> Result<(), eyre::Report> {
    let number = world
        .ticket
        .as_ref()
        .map(Ticket::number)
        .ok_or_else(|| eyre::eyre!("missing issue in scenario world"))?;
    world
        .issue_host
        .seed_comment(&world.repository, number, Comment::new(body))
        .wrap_err("seed issue comment")
}

#[given(r#"a task "{id}" exists in status "{status}""#)]
fn existing_task(world: &mut SyncWorld, id: String, status: String) -> Result<(), eyre::Report> {
    world
        .backend
        .seed_task(RemoteTaskId::new(id).wrap_err("task id")?, &status)
        .wrap_err("seed task")
}

#[given(r#"the status "{status}" is shown in color "{color}""#)]
fn status_color(world: &mut SyncWorld, status: String, color: String) -> Result<(), eyre::Report> {
    world
        .backend
        .set_status_color(&status, &color)
        .wrap_err("set status color")
}

fn pull_request(number: u64, branch: String, draft: bool) -> Result<ReviewRequest, eyre::Report> {
    Ok(ReviewRequest::new(
        TicketNumber::new(number).wrap_err("pull request number")?,
        BranchName::new(branch).wrap_err("branch name")?,
        draft,
    ))
}

#[given(r#"a pull request #{number:u64} from branch "{branch}""#)]
fn ready_pull_request(
    world: &mut SyncWorld,
    number: u64,
    branch: String,
) -> Result<(), eyre::Report> {
    world.review_request = Some(pull_request(number, branch, false)?);
    Ok(())
}

#[given(r#"a draft pull request #{number:u64} from branch "{branch}""#)]
fn draft_pull_request(
    world: &mut SyncWorld,
    number: u64,
    branch: String,
) -> Result<(), eyre::Report> {
    world.review_request = Some(pull_request(number, branch, true)?);
    Ok(())
}
