//! When steps for synchronisation BDD scenarios.

use super::world::{SyncWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use tasklink::sync::domain::{EventContext, Label, ReviewAction, SyncEvent, TicketAction};

fn dispatch(world: &mut SyncWorld, event: SyncEvent) {
    let context = EventContext::new(world.repository.clone(), event);
    world.last_result = Some(run_async(world.router.dispatch(&context)));
}

fn ticket_event(world: &mut SyncWorld, action: TicketAction) -> Result<(), eyre::Report> {
    let ticket = world
        .ticket
        .clone()
        .ok_or_else(|| eyre::eyre!("missing issue in scenario world"))?;
    dispatch(world, SyncEvent::Ticket { action, ticket });
    Ok(())
}

#[when("the issue is opened")]
fn issue_opened(world: &mut SyncWorld) -> Result<(), eyre::Report> {
    ticket_event(world, TicketAction::Opened)
}

#[when(r#"the label "{name}" is added to the issue"#)]
fn label_added(world: &mut SyncWorld, name: String) -> Result<(), eyre::Report> {
    let label = Label::new(name).wrap_err("added label")?;
    ticket_event(world, TicketAction::Labeled(label))
}

#[when("the issue is closed")]
fn issue_closed(world: &mut SyncWorld) -> Result<(), eyre::Report> {
    ticket_event(world, TicketAction::Closed)
}

#[when(r#"the pull request receives the "{action}" action"#)]
fn pull_request_action(world: &mut SyncWorld, action: String) -> Result<(), eyre::Report> {
    let review_request = world
        .review_request
        .clone()
        .ok_or_else(|| eyre::eyre!("missing pull request in scenario world"))?;
    dispatch(
        world,
        SyncEvent::ReviewRequest {
            action: ReviewAction::from(action.as_str()),
            review_request,
        },
    );
    Ok(())
}
