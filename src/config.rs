//! Action inputs.
//!
//! GitHub Actions passes `with:` inputs as `INPUT_*` environment variables
//! and describes the triggering event through `GITHUB_*` variables. Every
//! value can also be given as a long flag to replay an event locally.
//! Blank values count as unset, since the runner exports unset inputs as
//! empty strings.

use camino::Utf8PathBuf;
use clap::Parser;
use reqwest::Url;
use secrecy::SecretString;
use thiserror::Error;

use crate::sync::{
    adapters::{
        clickup::{ClickUpConfig, DEFAULT_CLICKUP_API_URL},
        github::{DEFAULT_GITHUB_API_URL, GitHubConfig},
    },
    domain::{
        ParseTagCasePolicyError, RepositoryFullName, StatusTarget, StatusVocabulary, SyncDomainError,
        TagCasePolicy, TaskListId,
    },
    services::{SyncSettings, TaskQueues},
};

/// Raw action inputs.
#[derive(Debug, Parser)]
#[command(
    name = "tasklink",
    version,
    about = "Keeps ClickUp tasks in step with GitHub issues and pull requests"
)]
pub struct SyncArgs {
    /// Token for the GitHub REST API.
    #[arg(long, env = "INPUT_GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: String,

    /// `ClickUp` API key.
    #[arg(long, env = "INPUT_CLICKUP_API_KEY", hide_env_values = true)]
    pub clickup_api_key: String,

    /// `ClickUp` list receiving problem tasks.
    #[arg(long, env = "INPUT_PROBLEM_LIST_ID")]
    pub problem_list_id: String,

    /// `ClickUp` list receiving feature tasks.
    #[arg(long, env = "INPUT_FEATURE_LIST_ID")]
    pub feature_list_id: String,

    /// Tag case policy: `lowercase` (default) or `preserve`.
    #[arg(long, env = "INPUT_TAG_CASE")]
    pub tag_case: Option<String>,

    /// Status name for new tasks.
    #[arg(long, env = "INPUT_STATUS_TODO")]
    pub status_todo: Option<String>,

    /// Status name for tasks whose pull request awaits review.
    #[arg(long, env = "INPUT_STATUS_IN_REVIEW")]
    pub status_in_review: Option<String>,

    /// Status name for finished tasks.
    #[arg(long, env = "INPUT_STATUS_DONE")]
    pub status_done: Option<String>,

    /// Directory holding `<template>.md` overrides.
    #[arg(long, env = "INPUT_TEMPLATES_DIR")]
    pub templates_dir: Option<Utf8PathBuf>,

    /// JSON file persisting issue-to-task links between runs.
    #[arg(long, env = "INPUT_LINK_STORE")]
    pub link_store: Option<Utf8PathBuf>,

    /// GitHub API root.
    #[arg(long, env = "INPUT_GITHUB_API_URL")]
    pub github_api_url: Option<String>,

    /// GitHub API root exported by the runner.
    #[arg(long, env = "GITHUB_API_URL", hide = true)]
    pub runner_github_api_url: Option<String>,

    /// `ClickUp` API root.
    #[arg(long, env = "INPUT_CLICKUP_API_URL")]
    pub clickup_api_url: Option<String>,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, env = "INPUT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Name of the triggering event.
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    pub event_name: String,

    /// Path of the webhook payload file.
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Utf8PathBuf,

    /// `owner/repo` of the triggering repository.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: String,
}

/// Triggering event coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSource {
    /// Event name, e.g. `issues`.
    pub name: String,
    /// Payload file.
    pub payload_path: Utf8PathBuf,
    /// Triggering repository.
    pub repository: RepositoryFullName,
}

/// Validated action configuration.
#[derive(Debug)]
pub struct SyncConfig {
    /// GitHub client settings.
    pub github: GitHubConfig,
    /// `ClickUp` client settings.
    pub clickup: ClickUpConfig,
    /// Handler settings.
    pub settings: SyncSettings,
    /// Template override directory.
    pub templates_dir: Option<Utf8PathBuf>,
    /// Link store file.
    pub link_store: Option<Utf8PathBuf>,
    /// Triggering event.
    pub event: EventSource,
    /// Fallback log filter.
    pub log_level: Option<String>,
}

/// Errors raised while validating inputs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required input is blank.
    #[error("input {0} is required")]
    Missing(&'static str),

    /// An input failed domain validation.
    #[error("invalid {input}: {source}")]
    Invalid {
        /// Input name.
        input: &'static str,
        /// Validation error.
        #[source]
        source: SyncDomainError,
    },

    /// The tag case policy is not recognised.
    #[error(transparent)]
    TagCase(#[from] ParseTagCasePolicyError),

    /// An API root is not a valid URL.
    #[error("invalid URL for {input}: {reason}")]
    InvalidUrl {
        /// Input name.
        input: &'static str,
        /// Parser error.
        reason: String,
    },
}

impl TryFrom<SyncArgs> for SyncConfig {
    type Error = ConfigError;

    fn try_from(args: SyncArgs) -> Result<Self, Self::Error> {
        let github_token = required(args.github_token, "github_token")?;
        let clickup_api_key = required(args.clickup_api_key, "clickup_api_key")?;
        let queues = TaskQueues::new(
            list_id(args.problem_list_id, "problem_list_id")?,
            list_id(args.feature_list_id, "feature_list_id")?,
        );
        let tag_case = optional(args.tag_case)
            .map(|raw| TagCasePolicy::try_from(raw.as_str()))
            .transpose()?
            .unwrap_or_default();
        let defaults = StatusVocabulary::default();
        let vocabulary = StatusVocabulary::new(
            optional(args.status_todo)
                .unwrap_or_else(|| defaults.name_for(StatusTarget::ToDo).to_owned()),
            optional(args.status_in_review)
                .unwrap_or_else(|| defaults.name_for(StatusTarget::InReview).to_owned()),
            optional(args.status_done)
                .unwrap_or_else(|| defaults.name_for(StatusTarget::Done).to_owned()),
        )
        .map_err(|source| ConfigError::Invalid {
            input: "status",
            source,
        })?;

        let github_url = optional(args.github_api_url)
            .or_else(|| optional(args.runner_github_api_url))
            .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_owned());
        let clickup_url = optional(args.clickup_api_url)
            .unwrap_or_else(|| DEFAULT_CLICKUP_API_URL.to_owned());

        let repository = RepositoryFullName::new(required(args.repository, "repository")?)
            .map_err(|source| ConfigError::Invalid {
                input: "repository",
                source,
            })?;

        Ok(Self {
            github: GitHubConfig::new(
                SecretString::new(github_token.into()),
                api_url(&github_url, "github_api_url")?,
            ),
            clickup: ClickUpConfig::new(
                SecretString::new(clickup_api_key.into()),
                api_url(&clickup_url, "clickup_api_url")?,
            ),
            settings: SyncSettings {
                queues,
                vocabulary,
                tag_case,
            },
            templates_dir: args.templates_dir.filter(|dir| !dir.as_str().trim().is_empty()),
            link_store: args.link_store.filter(|path| !path.as_str().trim().is_empty()),
            event: EventSource {
                name: required(args.event_name, "event_name")?,
                payload_path: args.event_path,
                repository,
            },
            log_level: optional(args.log_level),
        })
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

fn required(value: String, input: &'static str) -> Result<String, ConfigError> {
    optional(Some(value)).ok_or(ConfigError::Missing(input))
}

fn list_id(value: String, input: &'static str) -> Result<TaskListId, ConfigError> {
    TaskListId::new(required(value, input)?)
        .map_err(|source| ConfigError::Invalid { input, source })
}

fn api_url(raw: &str, input: &'static str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|err| ConfigError::InvalidUrl {
        input,
        reason: err.to_string(),
    })
}
