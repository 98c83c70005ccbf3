//! Claim arbitration under concurrent callers.

use super::helpers::{Marketplace, marketplace, posting, review_id, worker};
use reviewhub::catalog::domain::ReviewStatus;
use reviewhub::task::services::TaskLedgerError;
use rstest::rstest;
use tokio::task::JoinSet;

const CONTENDERS: usize = 16;

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_claims_have_exactly_one_winner(marketplace: Marketplace) -> eyre::Result<()> {
    marketplace.catalog.publish(posting("review-1", 15_000)).await?;

    let mut claims = JoinSet::new();
    for index in 0..CONTENDERS {
        let ledger = marketplace.ledger.clone();
        claims.spawn(async move {
            ledger
                .claim(&review_id("review-1"), &worker(&format!("worker-{index}")))
                .await
        });
    }

    let mut winners = Vec::new();
    let mut conflicts = 0_usize;
    while let Some(joined) = claims.join_next().await {
        match joined? {
            Ok(task) => winners.push(task),
            Err(TaskLedgerError::AlreadyAssigned(_)) => conflicts += 1,
            Err(other) => eyre::bail!("unexpected claim failure: {other}"),
        }
    }

    eyre::ensure!(winners.len() == 1, "expected one winner, got {}", winners.len());
    eyre::ensure!(conflicts == CONTENDERS - 1, "expected {} conflicts", CONTENDERS - 1);

    let winner = winners.first().ok_or_else(|| eyre::eyre!("missing winner"))?;
    let owned = marketplace.ledger.list_for_worker(winner.worker_id()).await?;
    eyre::ensure!(owned.len() == 1, "winner should own exactly one task");

    let review = marketplace.catalog.get(&review_id("review-1")).await?;
    eyre::ensure!(review.status() == ReviewStatus::Assigned, "review not assigned");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_claims_on_different_reviews_all_succeed(
    marketplace: Marketplace,
) -> eyre::Result<()> {
    for index in 0..CONTENDERS {
        marketplace
            .catalog
            .publish(posting(&format!("review-{index}"), 10_000))
            .await?;
    }

    let mut claims = JoinSet::new();
    for index in 0..CONTENDERS {
        let ledger = marketplace.ledger.clone();
        claims.spawn(async move {
            ledger
                .claim(&review_id(&format!("review-{index}")), &worker("worker-9"))
                .await
        });
    }
    while let Some(joined) = claims.join_next().await {
        joined??;
    }

    let tasks = marketplace.ledger.list_for_worker(&worker("worker-9")).await?;
    eyre::ensure!(tasks.len() == CONTENDERS, "expected {CONTENDERS} tasks, got {}", tasks.len());
    eyre::ensure!(
        marketplace.catalog.list_available().await?.is_empty(),
        "every review should be assigned"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assigned_review_disappears_from_listing(marketplace: Marketplace) -> eyre::Result<()> {
    marketplace.catalog.publish(posting("review-1", 15_000)).await?;
    marketplace.catalog.publish(posting("review-2", 12_000)).await?;

    marketplace
        .ledger
        .claim(&review_id("review-1"), &worker("worker-9"))
        .await?;

    let available = marketplace.catalog.list_available().await?;
    let ids: Vec<&str> = available.iter().map(|review| review.id().as_str()).collect();
    eyre::ensure!(ids == ["review-2"], "unexpected listing {ids:?}");
    Ok(())
}
