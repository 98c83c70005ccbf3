//! Presentation filters and ordering layered over the available catalog.

use super::{CatalogDomainError, Review, ReviewCategory};
use serde::{Deserialize, Serialize};

/// Ordering applied to listed reviews.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewSort {
    /// Most recently registered first.
    #[default]
    Latest,
    /// Highest reward first.
    Reward,
}

impl ReviewSort {
    /// Returns the canonical query-string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Reward => "reward",
        }
    }
}

impl TryFrom<&str> for ReviewSort {
    type Error = CatalogDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "latest" => Ok(Self::Latest),
            "reward" => Ok(Self::Reward),
            _ => Err(CatalogDomainError::UnknownSort(value.to_owned())),
        }
    }
}

/// Category filter, region filter, and ordering for a catalog listing.
///
/// Sorting is stable, so postings that compare equal keep catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewQuery {
    category: Option<ReviewCategory>,
    region: Option<String>,
    sort: ReviewSort,
}

impl ReviewQuery {
    /// Creates a query that matches everything, newest first.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the listing to one category.
    #[must_use]
    pub const fn with_category(mut self, category: ReviewCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Restricts the listing to regions containing `region`.
    ///
    /// A blank value clears the filter.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        let raw = region.into();
        let trimmed = raw.trim();
        self.region = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    /// Sets the ordering.
    #[must_use]
    pub const fn with_sort(mut self, sort: ReviewSort) -> Self {
        self.sort = sort;
        self
    }

    /// Returns the category filter, if any.
    #[must_use]
    pub const fn category(&self) -> Option<ReviewCategory> {
        self.category
    }

    /// Returns the region filter, if any.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Returns the ordering.
    #[must_use]
    pub const fn sort(&self) -> ReviewSort {
        self.sort
    }

    /// Returns `true` when `review` passes both filters.
    #[must_use]
    pub fn matches(&self, review: &Review) -> bool {
        let category_matches = self
            .category
            .is_none_or(|category| review.category() == category);
        let region_matches = self
            .region
            .as_deref()
            .is_none_or(|region| review.region().contains(region));
        category_matches && region_matches
    }

    /// Filters and orders `reviews`.
    #[must_use]
    pub fn apply(&self, reviews: Vec<Review>) -> Vec<Review> {
        let mut selected: Vec<Review> = reviews
            .into_iter()
            .filter(|review| self.matches(review))
            .collect();
        match self.sort {
            ReviewSort::Latest => {
                selected.sort_by(|a, b| b.registered_date().cmp(&a.registered_date()));
            }
            ReviewSort::Reward => selected.sort_by(|a, b| b.reward().cmp(&a.reward())),
        }
        selected
    }
}
