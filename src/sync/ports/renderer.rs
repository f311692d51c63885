//! Message renderer port: named templates and the data objects they render
//! against.

use crate::sync::domain::{RemoteTask, Ticket};
use serde_json::{Map, Value, json};
use std::fmt;
use thiserror::Error;

/// Named message templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateName {
    /// Asks the reporter to add a type label.
    MissingLabels,
    /// Confirms a problem task was created and carries its link marker.
    ProblemCreated,
    /// Confirms a feature task was created and carries its link marker.
    FeatureCreated,
    /// Reports a task status change on a review request.
    PrStatusChanged,
}

impl TemplateName {
    /// Every template name.
    pub const ALL: [Self; 4] = [
        Self::MissingLabels,
        Self::ProblemCreated,
        Self::FeatureCreated,
        Self::PrStatusChanged,
    ];

    /// Returns the template's file stem.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingLabels => "missing_labels",
            Self::ProblemCreated => "problem_created",
            Self::FeatureCreated => "feature_created",
            Self::PrStatusChanged => "pr_status_changed",
        }
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders named templates against a JSON data object.
pub trait MessageRenderer: Send + Sync {
    /// Renders the template.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the template is missing or fails to render.
    fn render(&self, template: TemplateName, data: &Value) -> Result<String, RenderError>;
}

/// Errors returned while rendering messages.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    /// No template is registered under the name.
    #[error("unknown message template: {0}")]
    UnknownTemplate(TemplateName),

    /// A template override could not be loaded.
    #[error("failed to load template {name}: {reason}")]
    Load {
        /// Template file name.
        name: String,
        /// Loader error.
        reason: String,
    },

    /// The template failed to render.
    #[error("failed to render template {template}: {reason}")]
    Render {
        /// Template name.
        template: TemplateName,
        /// Engine error.
        reason: String,
    },
}

/// Builds the data object for templates that reference a task.
///
/// The status name is URI-escaped and the color loses its leading `#`, so
/// both can be interpolated into badge URLs.
#[must_use]
pub fn task_context(task: &RemoteTask) -> Value {
    json!({ "task": task_json(task) })
}

/// Builds the data object for templates that reference a ticket, optionally
/// extended with its newly linked task.
#[must_use]
pub fn ticket_context(ticket: &Ticket, task: Option<&RemoteTask>) -> Value {
    let mut context = Map::new();
    if let Some(linked) = task {
        context.insert("task".to_owned(), task_json(linked));
    }
    context.insert(
        "ticket".to_owned(),
        json!({
            "number": ticket.number().value(),
            "title": ticket.title(),
            "url": ticket.html_url(),
        }),
    );
    Value::Object(context)
}

fn task_json(task: &RemoteTask) -> Value {
    json!({
        "id": task.id.as_str(),
        "url": task.url,
        "marker": task.marker(),
        "status": {
            "name": encode_uri(&task.status.name),
            "color": task.status.color.trim_start_matches('#'),
        },
        "tags": task.tags,
    })
}

/// Percent-encodes `value` the way a browser encodes a full URI: reserved
/// and unreserved characters pass through, everything else becomes UTF-8
/// `%XX` escapes.
#[must_use]
pub fn encode_uri(value: &str) -> String {
    const KEPT: &[u8] = b";,/?:@&=+$#-_.!~*'()";
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || KEPT.contains(&byte) {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}
