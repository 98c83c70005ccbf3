//! Error types for media value validation.

use thiserror::Error;

/// Errors returned while constructing media values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MediaDomainError {
    /// The upload category is not recognised.
    #[error("unknown upload type: {0}")]
    UnknownCategory(String),

    /// The bucket name is not recognised.
    #[error("unknown bucket: {0}")]
    UnknownBucket(String),

    /// The object path is empty, too long, or escapes its bucket.
    #[error("invalid object path '{0}'")]
    InvalidPath(String),
}
