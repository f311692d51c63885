//! Shared world state for synchronisation BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tasklink::sync::{
    adapters::{
        memory::{InMemoryIssueHost, InMemoryTaskBackend, InMemoryTaskLinkStore},
        templates::TemplateCatalog,
    },
    domain::{
        RepositoryFullName, ReviewRequest, StatusVocabulary, TagCasePolicy, TaskListId, Ticket,
    },
    services::{EventRouter, SyncPorts, SyncReport, SyncServiceError, SyncSettings, TaskQueues},
};

/// Router type used by the BDD world.
pub type TestRouter = EventRouter<
    InMemoryIssueHost,
    InMemoryTaskBackend,
    InMemoryTaskLinkStore,
    TemplateCatalog,
    DefaultClock,
>;

/// Scenario world wiring the router to in-memory adapters.
pub struct SyncWorld {
    pub repository: RepositoryFullName,
    pub issue_host: Arc<InMemoryIssueHost>,
    pub backend: Arc<InMemoryTaskBackend>,
    pub router: TestRouter,
    pub ticket: Option<Ticket>,
    pub review_request: Option<ReviewRequest>,
    pub last_result: Option<Result<SyncReport, SyncServiceError>>,
}

impl SyncWorld {
    /// Creates a world with problem list `900` and feature list `901`.
    ///
    /// # Panics
    ///
    /// Panics when the fixed identifiers fail validation.
    #[must_use]
    pub fn new() -> Self {
        let issue_host = Arc::new(InMemoryIssueHost::new());
        let backend = Arc::new(InMemoryTaskBackend::new());
        let settings = SyncSettings {
            queues: TaskQueues::new(
                TaskListId::new("900").expect("valid list"),
                TaskListId::new("901").expect("valid list"),
            ),
            vocabulary: StatusVocabulary::default(),
            tag_case: TagCasePolicy::Lowercase,
        };
        let router = EventRouter::new(
            SyncPorts {
                issue_host: Arc::clone(&issue_host),
                task_backend: Arc::clone(&backend),
                link_store: Arc::new(InMemoryTaskLinkStore::new()),
                renderer: Arc::new(TemplateCatalog::builtin()),
                clock: Arc::new(DefaultClock),
            },
            settings,
        );
        Self {
            repository: RepositoryFullName::new("acme/widgets").expect("valid repository"),
            issue_host,
            backend,
            router,
            ticket: None,
            review_request: None,
            last_result: None,
        }
    }

    /// Returns the result of the last dispatched event.
    ///
    /// # Errors
    ///
    /// Returns an error when no event has been dispatched yet.
    pub fn last_result(&self) -> Result<&Result<SyncReport, SyncServiceError>, eyre::Report> {
        self.last_result
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no event dispatched in scenario world"))
    }
}

impl Default for SyncWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SyncWorld {
    SyncWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
