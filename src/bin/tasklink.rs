//! GitHub Actions entry point.
//!
//! Reads the action inputs and the webhook payload named by
//! `GITHUB_EVENT_PATH`, processes the event once, and exits. Failures are
//! reported as an `::error::` workflow command and exit status 1.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use clap::Parser;
use mockable::DefaultClock;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use tasklink::config::{ConfigError, SyncArgs, SyncConfig};
use tasklink::sync::{
    adapters::{
        clickup::ClickUpClient,
        file::FileTaskLinkStore,
        github::{EventParseError, GitHubClient, parse_event_str},
        memory::InMemoryTaskLinkStore,
        templates::TemplateCatalog,
    },
    domain::EventContext,
    ports::{IssueHostError, RenderError, TaskLinkStore, TaskLinkStoreError},
    services::{EventRouter, SyncPorts, SyncReport, SyncServiceError, SyncSettings},
};
use tasklink::telemetry;
use thiserror::Error;
use tokio::runtime::Builder;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
enum ActionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to read event payload {path}: {source}")]
    Payload {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Event(#[from] EventParseError),
    #[error(transparent)]
    Templates(#[from] RenderError),
    #[error(transparent)]
    GitHub(#[from] IssueHostError),
    #[error(transparent)]
    LinkStore(#[from] TaskLinkStoreError),
    #[error(transparent)]
    Sync(#[from] SyncServiceError),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] io::Error),
}

fn main() -> ExitCode {
    let args = SyncArgs::parse();
    telemetry::init(telemetry::filter(
        std::env::var("RUST_LOG").ok().as_deref(),
        args.log_level.as_deref(),
    ));
    match run(args) {
        Ok(report) => {
            for diagnostic in &report.diagnostics {
                warn!(%diagnostic, "best-effort step failed");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "run failed");
            annotate_failure(&err);
            ExitCode::FAILURE
        }
    }
}

#[expect(
    clippy::print_stdout,
    reason = "workflow commands are read from stdout by the runner"
)]
fn annotate_failure(err: &ActionError) {
    println!("::error::{}", escape_workflow_data(&err.to_string()));
}

fn escape_workflow_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn run(args: SyncArgs) -> Result<SyncReport, ActionError> {
    let config = SyncConfig::try_from(args)?;
    let payload = read_payload(&config.event.payload_path)?;
    let context = parse_event_str(&config.event.name, config.event.repository.clone(), &payload)?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(ActionError::Runtime)?;
    runtime.block_on(dispatch(config, &context))
}

async fn dispatch(config: SyncConfig, context: &EventContext) -> Result<SyncReport, ActionError> {
    let renderer = match &config.templates_dir {
        Some(dir) => TemplateCatalog::with_overrides(dir)?,
        None => TemplateCatalog::builtin(),
    };
    let issue_host = GitHubClient::new(config.github)?;
    let task_backend = ClickUpClient::new(config.clickup);
    match &config.link_store {
        Some(path) => {
            info!(%path, "using file link store");
            let store = FileTaskLinkStore::open(path)?;
            route(issue_host, task_backend, store, renderer, config.settings, context).await
        }
        None => {
            let store = InMemoryTaskLinkStore::new();
            route(issue_host, task_backend, store, renderer, config.settings, context).await
        }
    }
}

async fn route<S: TaskLinkStore>(
    issue_host: GitHubClient,
    task_backend: ClickUpClient,
    link_store: S,
    renderer: TemplateCatalog,
    settings: SyncSettings,
    context: &EventContext,
) -> Result<SyncReport, ActionError> {
    let ports = SyncPorts {
        issue_host: Arc::new(issue_host),
        task_backend: Arc::new(task_backend),
        link_store: Arc::new(link_store),
        renderer: Arc::new(renderer),
        clock: Arc::new(DefaultClock),
    };
    let router = EventRouter::new(ports, settings);
    Ok(router.dispatch(context).await?)
}

fn read_payload(path: &Utf8Path) -> Result<String, ActionError> {
    let payload_error = |source: io::Error| ActionError::Payload {
        path: path.to_string(),
        source,
    };
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name().ok_or_else(|| {
        payload_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "payload path has no file name",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(payload_error)?;
    dir.read_to_string(file_name).map_err(payload_error)
}
