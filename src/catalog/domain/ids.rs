//! Identifier types for the catalog domain.

use super::CatalogDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a review posting, e.g. `review-1`.
///
/// Restricted to ASCII alphanumerics plus `-`, `_` and `.` so it can be
/// embedded in record keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReviewId(String);

impl ReviewId {
    const MAX_LENGTH: usize = 128;

    /// Creates a validated review identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogDomainError::InvalidReviewId`] when the value is
    /// empty, longer than 128 characters, or contains a character outside
    /// the permitted set.
    pub fn new(value: impl Into<String>) -> Result<Self, CatalogDomainError> {
        let raw = value.into();
        let is_valid = !raw.is_empty()
            && raw.len() <= Self::MAX_LENGTH
            && raw
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'));
        if !is_valid {
            return Err(CatalogDomainError::InvalidReviewId(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ReviewId {
    type Error = CatalogDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ReviewId> for String {
    fn from(value: ReviewId) -> Self {
        value.0
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
