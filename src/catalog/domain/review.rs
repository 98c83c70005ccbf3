//! Review posting aggregate and its value types.

use super::{CatalogDomainError, ReviewId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Review tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewCategory {
    /// Standard posting.
    General,
    /// Higher-paying posting with stricter requirements.
    Premium,
}

impl ReviewCategory {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Premium => "premium",
        }
    }
}

impl TryFrom<&str> for ReviewCategory {
    type Error = CatalogDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "general" => Ok(Self::General),
            "premium" => Ok(Self::Premium),
            _ => Err(CatalogDomainError::UnknownCategory(value.to_owned())),
        }
    }
}

/// Availability of a review posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// Open for claiming.
    Available,
    /// Claimed by a worker. Terminal.
    Assigned,
}

impl ReviewStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Assigned => "assigned",
        }
    }
}

impl TryFrom<&str> for ReviewStatus {
    type Error = CatalogDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "assigned" => Ok(Self::Assigned),
            _ => Err(CatalogDomainError::UnknownStatus(value.to_owned())),
        }
    }
}

/// Payout for a completed review, in minor currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Reward(u64);

impl Reward {
    /// Creates a validated reward.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogDomainError::NonPositiveReward`] for zero.
    pub const fn new(value: u64) -> Result<Self, CatalogDomainError> {
        if value == 0 {
            return Err(CatalogDomainError::NonPositiveReward);
        }
        Ok(Self(value))
    }

    /// Returns the amount.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for Reward {
    type Error = CatalogDomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Reward> for u64 {
    fn from(value: Reward) -> Self {
        value.0
    }
}

/// Parameter object describing a posting to publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    /// Posting identifier.
    pub id: ReviewId,
    /// Name of the reviewed business.
    pub business_name: String,
    /// Human-readable location.
    pub region: String,
    /// One-line summary.
    pub content: String,
    /// Full brief shown to workers.
    pub full_description: String,
    /// Optional cover image.
    pub image_url: Option<String>,
    /// Posting tier.
    pub category: ReviewCategory,
    /// Expected effort, as display text.
    pub duration: String,
    /// Payout.
    pub reward: Reward,
    /// Publication time.
    pub registered_date: DateTime<Utc>,
    /// Submission deadline.
    pub deadline: DateTime<Utc>,
    /// Conditions the worker must meet.
    pub requirements: Vec<String>,
    /// Things the worker must not do.
    pub restrictions: Vec<String>,
    /// How the visit is proven.
    pub verification_method: String,
}

/// Review posting as stored under `review:<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    id: ReviewId,
    business_name: String,
    region: String,
    content: String,
    full_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    #[serde(alias = "type")]
    category: ReviewCategory,
    duration: String,
    reward: Reward,
    registered_date: DateTime<Utc>,
    deadline: DateTime<Utc>,
    #[serde(default)]
    requirements: Vec<String>,
    #[serde(default)]
    restrictions: Vec<String>,
    #[serde(default)]
    verification_method: String,
    status: ReviewStatus,
}

impl Review {
    /// Creates an available posting.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogDomainError::EmptyBusinessName`] when the business
    /// name is blank.
    pub fn new(new_review: NewReview) -> Result<Self, CatalogDomainError> {
        let business_name = new_review.business_name.trim();
        if business_name.is_empty() {
            return Err(CatalogDomainError::EmptyBusinessName);
        }
        Ok(Self {
            id: new_review.id,
            business_name: business_name.to_owned(),
            region: new_review.region,
            content: new_review.content,
            full_description: new_review.full_description,
            image_url: new_review.image_url,
            category: new_review.category,
            duration: new_review.duration,
            reward: new_review.reward,
            registered_date: new_review.registered_date,
            deadline: new_review.deadline,
            requirements: new_review.requirements,
            restrictions: new_review.restrictions,
            verification_method: new_review.verification_method,
            status: ReviewStatus::Available,
        })
    }

    /// Returns the posting identifier.
    #[must_use]
    pub const fn id(&self) -> &ReviewId {
        &self.id
    }

    /// Returns the business name.
    #[must_use]
    pub fn business_name(&self) -> &str {
        &self.business_name
    }

    /// Returns the region.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Returns the one-line summary.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the full brief.
    #[must_use]
    pub fn full_description(&self) -> &str {
        &self.full_description
    }

    /// Returns the cover image, if any.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Returns the posting tier.
    #[must_use]
    pub const fn category(&self) -> ReviewCategory {
        self.category
    }

    /// Returns the expected effort.
    #[must_use]
    pub fn duration(&self) -> &str {
        &self.duration
    }

    /// Returns the payout.
    #[must_use]
    pub const fn reward(&self) -> Reward {
        self.reward
    }

    /// Returns the publication time.
    #[must_use]
    pub const fn registered_date(&self) -> DateTime<Utc> {
        self.registered_date
    }

    /// Returns the submission deadline.
    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Returns the requirements.
    #[must_use]
    pub fn requirements(&self) -> &[String] {
        &self.requirements
    }

    /// Returns the restrictions.
    #[must_use]
    pub fn restrictions(&self) -> &[String] {
        &self.restrictions
    }

    /// Returns the verification method.
    #[must_use]
    pub fn verification_method(&self) -> &str {
        &self.verification_method
    }

    /// Returns the availability status.
    #[must_use]
    pub const fn status(&self) -> ReviewStatus {
        self.status
    }

    /// Returns `true` while the posting can be claimed.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self.status, ReviewStatus::Available)
    }

    /// Flips the posting to assigned.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogDomainError::AlreadyAssigned`] when the posting was
    /// already assigned; the status never reverses.
    pub fn assign(&mut self) -> Result<(), CatalogDomainError> {
        if !self.is_available() {
            return Err(CatalogDomainError::AlreadyAssigned(self.id.clone()));
        }
        self.status = ReviewStatus::Assigned;
        Ok(())
    }
}
