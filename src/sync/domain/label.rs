//! Label taxonomy: classification of ticket labels into task kinds and tags.
//!
//! A label is a *type* label when its name starts with `type:`, a *syncable*
//! label when it starts with `target:` or `platform:`, and unclassified
//! otherwise. Prefixes are case-sensitive.

use super::{ParseTagCasePolicyError, SyncDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

const TYPE_PREFIX: &str = "type:";
const SYNCABLE_PREFIXES: [&str; 2] = ["target:", "platform:"];
const PROBLEM_SUFFIXES: [&str; 3] = ["bug", "chore", "security"];
const FEATURE_SUFFIX: &str = "suggestion";

/// Destination kind of a remote task, selected by the ticket's type label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Reported problem (bug, chore, security).
    Problem,
    /// Requested feature (suggestion).
    Feature,
}

impl TaskKind {
    /// Returns the canonical name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Problem => "problem",
            Self::Feature => "feature",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a single label name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelClass {
    /// `type:` label; `None` when the suffix is not a recognised type.
    Type(Option<TaskKind>),
    /// `target:` or `platform:` label propagated as a task tag.
    Syncable,
    /// Any other label.
    Unclassified,
}

impl LabelClass {
    /// Classifies a label name.
    #[must_use]
    pub fn of(name: &str) -> Self {
        if is_type_label(name) {
            Self::Type(classify_type(name))
        } else if is_syncable(name) {
            Self::Syncable
        } else {
            Self::Unclassified
        }
    }
}

/// Returns `true` when the label name carries the `type:` prefix.
#[must_use]
pub fn is_type_label(name: &str) -> bool {
    name.starts_with(TYPE_PREFIX)
}

/// Resolves the task kind of a `type:` label.
///
/// Returns `None` for labels without the prefix and for prefixed labels whose
/// suffix is not a recognised type.
///
/// # Examples
///
///     use tasklink::sync::domain::{TaskKind, classify_type};
///
///     assert_eq!(classify_type("type: bug"), Some(TaskKind::Problem));
///     assert_eq!(classify_type("type: suggestion"), Some(TaskKind::Feature));
///     assert_eq!(classify_type("type: question"), None);
#[must_use]
pub fn classify_type(name: &str) -> Option<TaskKind> {
    let suffix = name.strip_prefix(TYPE_PREFIX)?.trim();
    if PROBLEM_SUFFIXES.contains(&suffix) {
        Some(TaskKind::Problem)
    } else if suffix == FEATURE_SUFFIX {
        Some(TaskKind::Feature)
    } else {
        None
    }
}

/// Returns `true` when the label propagates to the remote task as a tag.
#[must_use]
pub fn is_syncable(name: &str) -> bool {
    SYNCABLE_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

/// Type-label state of a ticket's full label set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeLabelState {
    /// No `type:` label is present.
    Missing,
    /// Exactly one `type:` label is present but its suffix is unrecognised.
    Unrecognised(String),
    /// Exactly one recognised `type:` label is present.
    Recognised(TaskKind),
}

/// Resolves the type-label state of a ticket's full label set.
///
/// # Errors
///
/// Returns [`SyncDomainError::MultipleTypeLabels`] when more than one
/// `type:` label is present, recognised or not.
pub fn resolve_kind(labels: &[Label]) -> Result<TypeLabelState, SyncDomainError> {
    let type_labels: Vec<&Label> = labels
        .iter()
        .filter(|label| is_type_label(label.name()))
        .collect();
    match type_labels.as_slice() {
        [] => Ok(TypeLabelState::Missing),
        [single] => Ok(classify_type(single.name()).map_or_else(
            || TypeLabelState::Unrecognised(single.name().to_owned()),
            TypeLabelState::Recognised,
        )),
        many => Err(SyncDomainError::MultipleTypeLabels(
            many.iter().map(|label| label.name().to_owned()).collect(),
        )),
    }
}

/// Case policy applied to tag names before they reach the task backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagCasePolicy {
    /// Tags are lowercased, matching how the task backend stores them.
    #[default]
    Lowercase,
    /// Tags keep the label's original casing.
    Preserve,
}

impl TagCasePolicy {
    /// Applies the policy to a tag name.
    #[must_use]
    pub fn apply(self, tag: &str) -> String {
        match self {
            Self::Lowercase => tag.to_lowercase(),
            Self::Preserve => tag.to_owned(),
        }
    }

    /// Returns the canonical configuration value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lowercase => "lowercase",
            Self::Preserve => "preserve",
        }
    }
}

impl TryFrom<&str> for TagCasePolicy {
    type Error = ParseTagCasePolicyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lowercase" | "lower" => Ok(Self::Lowercase),
            "preserve" | "verbatim" => Ok(Self::Preserve),
            _ => Err(ParseTagCasePolicyError(value.to_owned())),
        }
    }
}

/// Collects the tags a new task should carry from the ticket's labels.
#[must_use]
pub fn syncable_tags(labels: &[Label], policy: TagCasePolicy) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in labels
        .iter()
        .filter(|label| is_syncable(label.name()))
        .map(|label| policy.apply(label.name()))
    {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

/// Ticket label as received from the issue tracker.
///
/// Only the name participates in classification; color and identifier are
/// carried for display and are opaque to synchronisation rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    name: String,
    color: Option<String>,
    id: Option<u64>,
}

impl Label {
    /// Creates a label with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`SyncDomainError::EmptyLabelName`] when the name is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, SyncDomainError> {
        let raw = name.into();
        if raw.trim().is_empty() {
            return Err(SyncDomainError::EmptyLabelName);
        }
        Ok(Self {
            name: raw,
            color: None,
            id: None,
        })
    }

    /// Sets the display color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the issue tracker's label identifier.
    #[must_use]
    pub const fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns the label name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the display color, if known.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Returns the issue tracker's label identifier, if known.
    #[must_use]
    pub const fn id(&self) -> Option<u64> {
        self.id
    }

    /// Classifies this label.
    #[must_use]
    pub fn class(&self) -> LabelClass {
        LabelClass::of(&self.name)
    }
}
