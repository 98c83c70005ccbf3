//! Review catalog service over the key-value store.

use super::samples::sample_reviews;
use crate::catalog::domain::{CatalogDomainError, NewReview, Review, ReviewId, ReviewQuery};
use crate::storage::{
    keys,
    ports::{KeyValueError, KeyValueStore, decode, encode},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Conditional-write attempts before `mark_assigned` or `publish` gives up.
const MAX_ASSIGN_ATTEMPTS: usize = 5;

/// Service-level errors for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No posting exists under the identifier.
    #[error("review not found: {0}")]
    NotFound(ReviewId),

    /// The posting was already claimed.
    #[error("review already assigned: {0}")]
    AlreadyAssigned(ReviewId),

    /// Concurrent writers kept changing the record.
    #[error("review {0} changed concurrently too many times")]
    Contention(ReviewId),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] CatalogDomainError),

    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] KeyValueError),
}

/// Result type for catalog service operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Outcome of [`ReviewCatalog::seed_samples`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The given number of sample postings were written.
    Seeded(usize),
    /// The catalog already held postings; nothing was written.
    AlreadySeeded,
}

/// Review catalog backed by `review:<id>` records.
pub struct ReviewCatalog<S, C>
where
    S: KeyValueStore + ?Sized,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> Clone for ReviewCatalog<S, C>
where
    S: KeyValueStore + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, C> ReviewCatalog<S, C>
where
    S: KeyValueStore + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a catalog service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Returns every posting that can still be claimed, in catalog order.
    ///
    /// Records that fail to decode are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] when the prefix scan fails.
    pub async fn list_available(&self) -> CatalogResult<Vec<Review>> {
        let values = self.store.get_by_prefix(keys::REVIEW_PREFIX).await?;
        let reviews = values
            .into_iter()
            .filter_map(|value| match decode::<Review>(keys::REVIEW_PREFIX, value) {
                Ok(review) => Some(review),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping undecodable review record");
                    None
                }
            })
            .filter(Review::is_available)
            .collect();
        Ok(reviews)
    }

    /// Returns available postings filtered and ordered by `query`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] when the prefix scan fails.
    pub async fn search(&self, query: &ReviewQuery) -> CatalogResult<Vec<Review>> {
        Ok(query.apply(self.list_available().await?))
    }

    /// Fetches one posting regardless of its status.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when no posting exists, or a store
    /// error when the read or decode fails.
    pub async fn get(&self, review_id: &ReviewId) -> CatalogResult<Review> {
        let key = keys::review(review_id.as_str());
        let value = self
            .store
            .get(&key)
            .await?
            .ok_or_else(|| CatalogError::NotFound(review_id.clone()))?;
        Ok(decode(&key, value)?)
    }

    /// Flips a posting from available to assigned.
    ///
    /// The write is conditional on the record read, so a concurrent flip is
    /// observed as [`CatalogError::AlreadyAssigned`] rather than lost.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`], [`CatalogError::AlreadyAssigned`],
    /// or [`CatalogError::Contention`] when unrelated writers keep replacing
    /// the record.
    pub async fn mark_assigned(&self, review_id: &ReviewId) -> CatalogResult<Review> {
        let key = keys::review(review_id.as_str());
        for attempt in 1..=MAX_ASSIGN_ATTEMPTS {
            let current = self
                .store
                .get(&key)
                .await?
                .ok_or_else(|| CatalogError::NotFound(review_id.clone()))?;
            let mut review: Review = decode(&key, current.clone())?;
            review.assign().map_err(|err| match err {
                CatalogDomainError::AlreadyAssigned(id) => CatalogError::AlreadyAssigned(id),
                other => CatalogError::Domain(other),
            })?;
            let replacement = encode(&key, &review)?;
            if self
                .store
                .compare_and_swap(&key, Some(current), replacement)
                .await?
            {
                tracing::info!(review_id = %review_id, "review marked assigned");
                return Ok(review);
            }
            tracing::debug!(review_id = %review_id, attempt, "review changed during assignment");
        }
        Err(CatalogError::Contention(review_id.clone()))
    }

    /// Publishes a posting, replacing a record with the same id only while
    /// that record is still available.
    ///
    /// An assigned posting is never reverted to available.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Domain`] when the posting is invalid,
    /// [`CatalogError::AlreadyAssigned`] when the stored posting has been
    /// claimed, [`CatalogError::Contention`] when concurrent writers keep
    /// replacing the record, or a store error when a read or write fails.
    pub async fn publish(&self, new_review: NewReview) -> CatalogResult<Review> {
        let review = Review::new(new_review)?;
        let key = keys::review(review.id().as_str());
        let replacement = encode(&key, &review)?;
        for attempt in 1..=MAX_ASSIGN_ATTEMPTS {
            let current = self.store.get(&key).await?;
            if let Some(stored) = &current
                && !decode::<Review>(&key, stored.clone())?.is_available()
            {
                return Err(CatalogError::AlreadyAssigned(review.id().clone()));
            }
            if self
                .store
                .compare_and_swap(&key, current, replacement.clone())
                .await?
            {
                tracing::info!(review_id = %review.id(), "review published");
                return Ok(review);
            }
            tracing::debug!(review_id = %review.id(), attempt, "review changed during publish");
        }
        Err(CatalogError::Contention(review.id().clone()))
    }

    /// Writes the built-in sample postings when the catalog is empty.
    ///
    /// Existing records are never overwritten, so concurrent seeding is
    /// harmless.
    ///
    /// # Errors
    ///
    /// Returns a store error when a read or write fails.
    pub async fn seed_samples(&self) -> CatalogResult<SeedOutcome> {
        if !self
            .store
            .get_by_prefix(keys::REVIEW_PREFIX)
            .await?
            .is_empty()
        {
            return Ok(SeedOutcome::AlreadySeeded);
        }

        let mut written = 0_usize;
        for new_review in sample_reviews(self.clock.utc())? {
            let review = Review::new(new_review)?;
            let key = keys::review(review.id().as_str());
            if self
                .store
                .compare_and_swap(&key, None, encode(&key, &review)?)
                .await?
            {
                written = written.saturating_add(1);
            }
        }
        tracing::info!(count = written, "seeded sample reviews");
        Ok(SeedOutcome::Seeded(written))
    }
}
