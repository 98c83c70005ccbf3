//! Claims interrupted by store failures and their repair.

use std::sync::Arc;

use super::helpers::{FaultyStore, posting, review_id, worker};
use mockable::DefaultClock;
use reviewhub::catalog::{domain::ReviewStatus, services::ReviewCatalog};
use reviewhub::storage::{adapters::memory::InMemoryKeyValueStore, keys};
use reviewhub::task::services::{TaskLedger, TaskLedgerError};
use rstest::rstest;

type TestLedger = TaskLedger<FaultyStore, DefaultClock>;
type TestCatalog = ReviewCatalog<FaultyStore, DefaultClock>;

/// Claims `review-1` through a store whose first write under
/// `failing_prefix` fails, leaving only the claim row behind.
async fn interrupted_claim(
    failing_prefix: &'static str,
) -> eyre::Result<(TestLedger, TestCatalog)> {
    let store = Arc::new(FaultyStore::new(InMemoryKeyValueStore::new(), failing_prefix));
    let clock = Arc::new(DefaultClock);
    let catalog = ReviewCatalog::new(Arc::clone(&store), Arc::clone(&clock));
    let ledger = TaskLedger::new(store, clock);
    catalog.publish(posting("review-1", 15_000)).await?;

    let interrupted = ledger.claim(&review_id("review-1"), &worker("worker-9")).await;
    eyre::ensure!(
        matches!(interrupted, Err(TaskLedgerError::Store(_))),
        "claim should surface the injected failure, got {interrupted:?}"
    );
    Ok((ledger, catalog))
}

async fn ensure_worker_9_holds_review_1(
    ledger: &TestLedger,
    catalog: &TestCatalog,
) -> eyre::Result<()> {
    let tasks = ledger.list_for_worker(&worker("worker-9")).await?;
    eyre::ensure!(tasks.len() == 1, "original claimant should own the task");
    let review = catalog.get(&review_id("review-1")).await?;
    eyre::ensure!(review.status() == ReviewStatus::Assigned, "review should be assigned");
    Ok(())
}

#[rstest]
#[case::task_write_fails(keys::TASK_PREFIX)]
#[case::index_write_fails(keys::WORKER_TASK_PREFIX)]
#[tokio::test(flavor = "multi_thread")]
async fn reconcile_completes_a_claim_interrupted_by_a_failed_write(
    #[case] failing_prefix: &'static str,
) -> eyre::Result<()> {
    let (ledger, catalog) = interrupted_claim(failing_prefix).await?;

    let report = ledger.reconcile().await?;
    eyre::ensure!(!report.is_clean(), "reconcile should repair something");
    ensure_worker_9_holds_review_1(&ledger, &catalog).await?;

    eyre::ensure!(ledger.reconcile().await?.is_clean(), "second pass should be clean");
    Ok(())
}

#[rstest]
#[case::task_write_fails(keys::TASK_PREFIX)]
#[case::index_write_fails(keys::WORKER_TASK_PREFIX)]
#[tokio::test(flavor = "multi_thread")]
async fn losing_retry_completes_a_claim_interrupted_by_a_failed_write(
    #[case] failing_prefix: &'static str,
) -> eyre::Result<()> {
    let (ledger, catalog) = interrupted_claim(failing_prefix).await?;

    let retry = ledger.claim(&review_id("review-1"), &worker("worker-2")).await;
    eyre::ensure!(
        matches!(retry, Err(TaskLedgerError::AlreadyAssigned(_))),
        "the claim row must keep the review exclusive, got {retry:?}"
    );
    ensure_worker_9_holds_review_1(&ledger, &catalog).await?;

    eyre::ensure!(ledger.reconcile().await?.is_clean(), "nothing should be left to repair");
    Ok(())
}
