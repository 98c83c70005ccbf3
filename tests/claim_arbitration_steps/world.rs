//! Shared world state for claim arbitration BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use reviewhub::catalog::services::ReviewCatalog;
use reviewhub::identity::domain::UserId;
use reviewhub::storage::adapters::memory::InMemoryKeyValueStore;
use reviewhub::task::domain::{Submission, Task};
use reviewhub::task::services::{TaskLedger, TaskLedgerError};
use rstest::fixture;

/// Catalog type used by the BDD world.
pub type TestCatalog = ReviewCatalog<InMemoryKeyValueStore, DefaultClock>;

/// Ledger type used by the BDD world.
pub type TestLedger = TaskLedger<InMemoryKeyValueStore, DefaultClock>;

/// Scenario world for claim arbitration behaviour tests.
pub struct MarketplaceWorld {
    pub catalog: TestCatalog,
    pub ledger: TestLedger,
    pub current_task: Option<Task>,
    pub last_claim: Option<Result<Task, TaskLedgerError>>,
    pub last_submission: Option<Result<Task, TaskLedgerError>>,
}

impl MarketplaceWorld {
    /// Creates a world over an empty store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let clock = Arc::new(DefaultClock);
        Self {
            catalog: ReviewCatalog::new(Arc::clone(&store), Arc::clone(&clock)),
            ledger: TaskLedger::new(store, clock),
            current_task: None,
            last_claim: None,
            last_submission: None,
        }
    }

    /// Returns the task the scenario is working on.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.current_task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing current task in scenario world"))
    }
}

impl Default for MarketplaceWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> MarketplaceWorld {
    MarketplaceWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses a worker identifier from scenario text.
pub fn worker_id(raw: &str) -> Result<UserId, eyre::Report> {
    UserId::new(raw).map_err(|err| eyre::eyre!("invalid worker id in scenario: {err}"))
}

/// Builds a submission with one photo.
pub fn submission(text: &str) -> Submission {
    Submission::new(text, vec!["https://cdn.test/images/visit.png".to_owned()])
}
