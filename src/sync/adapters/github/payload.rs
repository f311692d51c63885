//! Webhook payload parsing into [`EventContext`].

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::sync::domain::{
    BranchName, EventContext, Label, RepositoryFullName, ReviewAction, ReviewRequest,
    SyncDomainError, SyncEvent, Ticket, TicketAction, TicketNumber,
};

const ISSUES_EVENT: &str = "issues";
const PULL_REQUEST_EVENT: &str = "pull_request";

/// Errors raised while turning a webhook payload into an event context.
#[derive(Debug, Error)]
pub enum EventParseError {
    /// A handled event lacks a field its handler needs.
    #[error("event payload is missing {0}")]
    MissingContext(&'static str),

    /// The payload is not valid JSON.
    #[error("event payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A payload section does not have the expected shape.
    #[error("malformed {section} in event payload: {reason}")]
    Malformed {
        /// Payload section.
        section: &'static str,
        /// Decoder error.
        reason: String,
    },

    /// A payload value failed domain validation.
    #[error(transparent)]
    Domain(#[from] SyncDomainError),
}

#[derive(Debug, Deserialize)]
struct IssuePayload {
    number: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    html_url: Option<String>,
    #[serde(default)]
    closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    labels: Option<Vec<LabelPayload>>,
}

#[derive(Debug, Deserialize)]
struct LabelPayload {
    name: String,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    id: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    number: u64,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    html_url: Option<String>,
    head: HeadPayload,
}

#[derive(Debug, Deserialize)]
struct HeadPayload {
    #[serde(rename = "ref")]
    branch: Option<String>,
}

/// Parses a webhook payload given as JSON text.
///
/// # Errors
///
/// Returns [`EventParseError::Json`] for invalid JSON, otherwise the errors of
/// [`parse_event`].
pub fn parse_event_str(
    event_name: &str,
    repository: RepositoryFullName,
    payload: &str,
) -> Result<EventContext, EventParseError> {
    let value: Value = serde_json::from_str(payload)?;
    parse_event(event_name, repository, &value)
}

/// Classifies a webhook payload.
///
/// `issues` events with `opened`, `labeled` or `closed` actions become ticket
/// events, and every `pull_request` event becomes a review-request event.
/// Anything else is [`SyncEvent::Unhandled`].
///
/// # Errors
///
/// Returns [`EventParseError::MissingContext`] when a handled event lacks the
/// ticket, the added label or the review request, and
/// [`EventParseError::Malformed`] or [`EventParseError::Domain`] when those
/// are present but invalid.
pub fn parse_event(
    event_name: &str,
    repository: RepositoryFullName,
    payload: &Value,
) -> Result<EventContext, EventParseError> {
    let action = payload.get("action").and_then(Value::as_str);
    debug!(event_name, action, "classifying event payload");
    let event = match (event_name, action) {
        (ISSUES_EVENT, Some("opened")) => ticket_event(TicketAction::Opened, payload)?,
        (ISSUES_EVENT, Some("closed")) => ticket_event(TicketAction::Closed, payload)?,
        (ISSUES_EVENT, Some("labeled")) => {
            let label: LabelPayload = section(payload, "label")?;
            ticket_event(TicketAction::Labeled(label.try_into()?), payload)?
        }
        (PULL_REQUEST_EVENT, Some(name)) => review_event(ReviewAction::from(name), payload)?,
        (PULL_REQUEST_EVENT, None) => return Err(EventParseError::MissingContext("action")),
        _ => SyncEvent::Unhandled {
            event_name: event_name.to_owned(),
            action: action.map(str::to_owned),
        },
    };
    Ok(EventContext::new(repository, event))
}

fn ticket_event(action: TicketAction, payload: &Value) -> Result<SyncEvent, EventParseError> {
    let issue: IssuePayload = section(payload, "issue")?;
    let labels = issue
        .labels
        .ok_or(EventParseError::MissingContext("issue labels"))?
        .into_iter()
        .map(Label::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let mut ticket = Ticket::new(
        TicketNumber::new(issue.number)?,
        issue.title.unwrap_or_default(),
    )
    .with_labels(labels);
    if let Some(body) = issue.body {
        ticket = ticket.with_body(body);
    }
    if let Some(url) = issue.html_url {
        ticket = ticket.with_html_url(url);
    }
    if let Some(closed_at) = issue.closed_at {
        ticket = ticket.with_closed_at(closed_at);
    }
    Ok(SyncEvent::Ticket { action, ticket })
}

fn review_event(action: ReviewAction, payload: &Value) -> Result<SyncEvent, EventParseError> {
    let pull: PullRequestPayload = section(payload, "pull_request")?;
    let branch = pull
        .head
        .branch
        .ok_or(EventParseError::MissingContext("pull_request head ref"))?;
    let mut review_request = ReviewRequest::new(
        TicketNumber::new(pull.number)?,
        BranchName::new(branch)?,
        pull.draft,
    );
    if let Some(url) = pull.html_url {
        review_request = review_request.with_html_url(url);
    }
    Ok(SyncEvent::ReviewRequest {
        action,
        review_request,
    })
}

fn section<T: DeserializeOwned>(
    payload: &Value,
    name: &'static str,
) -> Result<T, EventParseError> {
    let raw = payload
        .get(name)
        .filter(|value| !value.is_null())
        .ok_or(EventParseError::MissingContext(name))?;
    T::deserialize(raw).map_err(|err| EventParseError::Malformed {
        section: name,
        reason: err.to_string(),
    })
}

impl TryFrom<LabelPayload> for Label {
    type Error = SyncDomainError;

    fn try_from(payload: LabelPayload) -> Result<Self, Self::Error> {
        let mut label = Self::new(payload.name)?;
        if let Some(color) = payload.color {
            label = label.with_color(color);
        }
        if let Some(id) = payload.id {
            label = label.with_id(id);
        }
        Ok(label)
    }
}
