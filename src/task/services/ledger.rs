//! Task ledger: claim arbitration, submission, and lifecycle queries.

use crate::catalog::{
    domain::ReviewId,
    services::{CatalogError, ReviewCatalog},
};
use crate::identity::domain::UserId;
use crate::storage::{
    keys,
    ports::{KeyValueError, KeyValueStore, decode, encode},
};
use crate::task::domain::{
    ClaimRecord, EarningsSummary, Submission, Task, TaskDomainError, TaskId, TaskStatus,
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Conditional-write attempts before a task update gives up.
const MAX_UPDATE_ATTEMPTS: usize = 5;

/// Service-level errors for task ledger operations.
#[derive(Debug, Error)]
pub enum TaskLedgerError {
    /// No review exists under the identifier.
    #[error("review not found: {0}")]
    ReviewNotFound(ReviewId),

    /// The review has already been claimed.
    #[error("review already assigned: {0}")]
    AlreadyAssigned(ReviewId),

    /// No task exists under the identifier.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The caller does not own the task.
    #[error("worker {caller} does not own task {task_id}")]
    Forbidden {
        /// Task the caller tried to change.
        task_id: TaskId,
        /// Authenticated caller.
        caller: UserId,
    },

    /// Concurrent writers kept changing the task record.
    #[error("task {0} changed concurrently too many times")]
    Contention(TaskId),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Catalog operation failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] KeyValueError),
}

/// Result type for task ledger operations.
pub type TaskLedgerResult<T> = Result<T, TaskLedgerError>;

/// Task ledger over the key-value store.
///
/// The ledger keeps no in-process state; every decision is taken against
/// the store, and every gating read completes before the matching write.
pub struct TaskLedger<S, C>
where
    S: KeyValueStore + ?Sized,
    C: Clock + Send + Sync,
{
    pub(super) store: Arc<S>,
    pub(super) catalog: ReviewCatalog<S, C>,
    clock: Arc<C>,
}

impl<S, C> Clone for TaskLedger<S, C>
where
    S: KeyValueStore + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            catalog: self.catalog.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, C> TaskLedger<S, C>
where
    S: KeyValueStore + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a ledger over `store`.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        let catalog = ReviewCatalog::new(Arc::clone(&store), Arc::clone(&clock));
        Self {
            store,
            catalog,
            clock,
        }
    }

    /// Claims `review_id` for `worker_id`.
    ///
    /// The review is won by whoever first creates its `claim:` row; every
    /// other concurrent caller fails with
    /// [`TaskLedgerError::AlreadyAssigned`]. The winner then persists the
    /// task, the worker index entry, and the review's assigned status. A
    /// crash between those writes is repaired by the next losing caller on
    /// the same review, or by [`TaskLedger::reconcile`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskLedgerError::ReviewNotFound`],
    /// [`TaskLedgerError::AlreadyAssigned`], or a store/catalog error.
    pub async fn claim(&self, review_id: &ReviewId, worker_id: &UserId) -> TaskLedgerResult<Task> {
        let review = self.catalog.get(review_id).await.map_err(|err| match err {
            CatalogError::NotFound(id) => TaskLedgerError::ReviewNotFound(id),
            other => TaskLedgerError::Catalog(other),
        })?;
        if !review.is_available() {
            return Err(TaskLedgerError::AlreadyAssigned(review_id.clone()));
        }

        let task = Task::claim(&review, worker_id.clone(), &*self.clock);
        let claim_key = keys::claim(review_id.as_str());
        let record = ClaimRecord::for_task(task.clone());
        let won = self
            .store
            .compare_and_swap(&claim_key, None, encode(&claim_key, &record)?)
            .await?;
        if !won {
            tracing::info!(review_id = %review_id, worker_id = %worker_id, "claim lost");
            if let Err(err) = self.complete_winning_claim(review_id).await {
                tracing::warn!(review_id = %review_id, error = %err, "could not complete winning claim");
            }
            return Err(TaskLedgerError::AlreadyAssigned(review_id.clone()));
        }

        self.persist_claimed(&task).await?;
        tracing::info!(
            review_id = %review_id,
            worker_id = %worker_id,
            task_id = %task.id(),
            "claim won"
        );
        Ok(task)
    }

    async fn persist_claimed(&self, task: &Task) -> TaskLedgerResult<()> {
        let task_key = keys::task(task.id().as_str());
        self.store.set(&task_key, encode(&task_key, task)?).await?;

        let index_key = keys::worker_task(task.worker_id().as_str(), task.id().as_str());
        self.store
            .set(&index_key, encode(&index_key, task.id())?)
            .await?;

        match self.catalog.mark_assigned(task.review_id()).await {
            Ok(_) => Ok(()),
            Err(CatalogError::AlreadyAssigned(review_id)) => {
                tracing::warn!(review_id = %review_id, "claimed review was already assigned");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Returns the worker's tasks in claim order.
    ///
    /// Index entries whose task record is missing or undecodable are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns a store error when a read fails.
    pub async fn list_for_worker(&self, worker_id: &UserId) -> TaskLedgerResult<Vec<Task>> {
        let prefix = keys::worker_tasks_prefix(worker_id.as_str());
        let entries = self.store.get_by_prefix(&prefix).await?;
        let mut tasks = Vec::with_capacity(entries.len());
        for entry in entries {
            let task_id = match decode::<TaskId>(&prefix, entry) {
                Ok(task_id) => task_id,
                Err(err) => {
                    tracing::warn!(worker_id = %worker_id, error = %err, "skipping malformed index entry");
                    continue;
                }
            };
            let found = match self.find(&task_id).await {
                Ok(found) => found,
                Err(TaskLedgerError::Store(KeyValueError::Encoding { .. })) => {
                    tracing::warn!(worker_id = %worker_id, task_id = %task_id, "skipping undecodable task record");
                    continue;
                }
                Err(err) => return Err(err),
            };
            match found {
                Some(task) if task.is_owned_by(worker_id) => tasks.push(task),
                Some(_) => {
                    tracing::warn!(worker_id = %worker_id, task_id = %task_id, "index entry points at another worker's task");
                }
                None => {
                    tracing::debug!(worker_id = %worker_id, task_id = %task_id, "skipping stale index entry");
                }
            }
        }
        Ok(tasks)
    }

    /// Looks up a task.
    ///
    /// # Errors
    ///
    /// Returns a store error when the read or decode fails.
    pub async fn find(&self, task_id: &TaskId) -> TaskLedgerResult<Option<Task>> {
        let key = keys::task(task_id.as_str());
        let task = self
            .store
            .get(&key)
            .await?
            .map(|value| decode(&key, value))
            .transpose()?;
        Ok(task)
    }

    /// Hands in `submission` for a `writing` task owned by `caller`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLedgerError::TaskNotFound`],
    /// [`TaskLedgerError::Forbidden`], or
    /// [`TaskDomainError::InvalidStateTransition`] when the task was already
    /// submitted. The stored task is unchanged on error.
    pub async fn submit(
        &self,
        task_id: &TaskId,
        caller: &UserId,
        submission: Submission,
    ) -> TaskLedgerResult<Task> {
        let clock = &*self.clock;
        let task = self
            .update_task(task_id, |task| {
                if !task.is_owned_by(caller) {
                    return Err(TaskLedgerError::Forbidden {
                        task_id: task_id.clone(),
                        caller: caller.clone(),
                    });
                }
                task.submit(submission.clone(), clock)?;
                Ok(())
            })
            .await?;
        tracing::info!(task_id = %task_id, worker_id = %caller, "task submitted");
        Ok(task)
    }

    /// Advances a task past `submitted`, on behalf of the approval process.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLedgerError::TaskNotFound`] or a domain error when
    /// `target` is not the next status.
    pub async fn advance_status(
        &self,
        task_id: &TaskId,
        target: TaskStatus,
    ) -> TaskLedgerResult<Task> {
        let task = self
            .update_task(task_id, |task| Ok(task.advance_to(target)?))
            .await?;
        tracing::info!(task_id = %task_id, status = %target, "task status advanced");
        Ok(task)
    }

    /// Aggregates the worker's earnings.
    ///
    /// # Errors
    ///
    /// Returns a store error when a read fails.
    pub async fn earnings(&self, worker_id: &UserId) -> TaskLedgerResult<EarningsSummary> {
        let tasks = self.list_for_worker(worker_id).await?;
        Ok(EarningsSummary::from_tasks(&tasks))
    }

    /// Applies `apply` to the stored task and writes it back only if the
    /// record is unchanged since it was read.
    async fn update_task<F>(&self, task_id: &TaskId, mut apply: F) -> TaskLedgerResult<Task>
    where
        F: FnMut(&mut Task) -> TaskLedgerResult<()> + Send,
    {
        let key = keys::task(task_id.as_str());
        for attempt in 1..=MAX_UPDATE_ATTEMPTS {
            let current = self
                .store
                .get(&key)
                .await?
                .ok_or_else(|| TaskLedgerError::TaskNotFound(task_id.clone()))?;
            let mut task: Task = decode(&key, current.clone())?;
            apply(&mut task)?;
            let replacement = encode(&key, &task)?;
            if self
                .store
                .compare_and_swap(&key, Some(current), replacement)
                .await?
            {
                return Ok(task);
            }
            tracing::debug!(task_id = %task_id, attempt, "task changed during update");
        }
        Err(TaskLedgerError::Contention(task_id.clone()))
    }
}
