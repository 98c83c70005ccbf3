//! Error types for catalog value validation and parsing.

use super::ReviewId;
use thiserror::Error;

/// Errors returned while constructing catalog values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogDomainError {
    /// The review identifier is empty, too long, or contains unsupported
    /// characters.
    #[error("invalid review id '{0}'")]
    InvalidReviewId(String),

    /// Rewards must be strictly positive.
    #[error("reward must be a positive amount")]
    NonPositiveReward,

    /// The business name is empty after trimming.
    #[error("business name must not be empty")]
    EmptyBusinessName,

    /// The posting has already been claimed.
    #[error("review already assigned: {0}")]
    AlreadyAssigned(ReviewId),

    /// The category value is not recognised.
    #[error("unknown review category: {0}")]
    UnknownCategory(String),

    /// The status value is not recognised.
    #[error("unknown review status: {0}")]
    UnknownStatus(String),

    /// The sort key is not recognised.
    #[error("unknown sort order: {0}")]
    UnknownSort(String),
}
