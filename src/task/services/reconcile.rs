//! Roll-forward repair of partially persisted claims.

use super::ledger::{TaskLedger, TaskLedgerResult};
use crate::catalog::{domain::ReviewId, services::CatalogError};
use crate::storage::{
    keys,
    ports::{KeyValueStore, decode, encode},
};
use crate::task::domain::ClaimRecord;
use mockable::Clock;

/// Counts of what a reconciliation pass examined and repaired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconciliationReport {
    /// Claim rows inspected.
    pub claims_examined: usize,
    /// Task records recreated from their claim row.
    pub tasks_restored: usize,
    /// Worker index entries recreated.
    pub index_entries_restored: usize,
    /// Reviews flipped from available to assigned.
    pub reviews_marked_assigned: usize,
}

impl ReconciliationReport {
    /// Returns `true` when nothing needed repair.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.tasks_restored == 0
            && self.index_entries_restored == 0
            && self.reviews_marked_assigned == 0
    }
}

impl<S, C> TaskLedger<S, C>
where
    S: KeyValueStore + ?Sized,
    C: Clock + Send + Sync,
{
    /// Completes every claim whose follow-up writes were interrupted.
    ///
    /// For each `claim:` row: a missing task record is recreated from the
    /// row, a missing worker index entry is recreated, and a review still
    /// marked available is flipped to assigned. Existing task records are
    /// never overwritten, so the pass is idempotent and safe to run while
    /// serving traffic.
    ///
    /// # Errors
    ///
    /// Returns a store or catalog error when a read or write fails.
    pub async fn reconcile(&self) -> TaskLedgerResult<ReconciliationReport> {
        let mut report = ReconciliationReport::default();
        let rows = self.store.get_by_prefix(keys::CLAIM_PREFIX).await?;
        for row in rows {
            let record = match decode::<ClaimRecord>(keys::CLAIM_PREFIX, row) {
                Ok(record) => record,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping undecodable claim row");
                    continue;
                }
            };
            report.claims_examined = report.claims_examined.saturating_add(1);
            self.repair_claim(&record, &mut report).await?;
        }

        if report.is_clean() {
            tracing::info!(claims = report.claims_examined, "reconciliation found nothing to repair");
        } else {
            tracing::warn!(
                claims = report.claims_examined,
                tasks_restored = report.tasks_restored,
                index_entries_restored = report.index_entries_restored,
                reviews_marked_assigned = report.reviews_marked_assigned,
                "reconciliation repaired interrupted claims"
            );
        }
        Ok(report)
    }

    /// Finishes the winning claim on `review_id` if its follow-up writes
    /// are missing. Called by a caller that just lost the claim race.
    pub(super) async fn complete_winning_claim(
        &self,
        review_id: &ReviewId,
    ) -> TaskLedgerResult<()> {
        let claim_key = keys::claim(review_id.as_str());
        let Some(row) = self.store.get(&claim_key).await? else {
            return Ok(());
        };
        let record: ClaimRecord = decode(&claim_key, row)?;
        let mut report = ReconciliationReport::default();
        self.repair_claim(&record, &mut report).await?;
        if !report.is_clean() {
            tracing::warn!(
                review_id = %review_id,
                tasks_restored = report.tasks_restored,
                index_entries_restored = report.index_entries_restored,
                reviews_marked_assigned = report.reviews_marked_assigned,
                "completed interrupted claim after losing the race"
            );
        }
        Ok(())
    }

    async fn repair_claim(
        &self,
        record: &ClaimRecord,
        report: &mut ReconciliationReport,
    ) -> TaskLedgerResult<()> {
        let task = &record.task;

        let task_key = keys::task(task.id().as_str());
        if self
            .store
            .compare_and_swap(&task_key, None, encode(&task_key, task)?)
            .await?
        {
            tracing::info!(task_id = %task.id(), "restored task from claim row");
            report.tasks_restored = report.tasks_restored.saturating_add(1);
        }

        let index_key = keys::worker_task(task.worker_id().as_str(), task.id().as_str());
        if self
            .store
            .compare_and_swap(&index_key, None, encode(&index_key, task.id())?)
            .await?
        {
            tracing::info!(task_id = %task.id(), worker_id = %task.worker_id(), "restored worker index entry");
            report.index_entries_restored = report.index_entries_restored.saturating_add(1);
        }

        match self.catalog.mark_assigned(&record.review_id).await {
            Ok(_) => {
                tracing::info!(review_id = %record.review_id, "marked claimed review assigned");
                report.reviews_marked_assigned = report.reviews_marked_assigned.saturating_add(1);
            }
            Err(CatalogError::AlreadyAssigned(_)) => {}
            Err(CatalogError::NotFound(review_id)) => {
                tracing::warn!(review_id = %review_id, "claim row refers to a missing review");
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }
}
