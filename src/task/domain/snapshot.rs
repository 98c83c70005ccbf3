//! Copy of a review taken when it is claimed.

use crate::catalog::domain::{Review, ReviewCategory, Reward};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Denormalised review details embedded in a task.
///
/// The snapshot is an independent copy and is never refreshed, so the
/// worker's view stays stable even if the live posting later changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSnapshot {
    /// Name of the reviewed business.
    pub business_name: String,
    /// Human-readable location.
    pub region: String,
    /// One-line summary.
    pub content: String,
    /// Full brief.
    pub full_description: String,
    /// Optional cover image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Posting tier.
    #[serde(alias = "type")]
    pub category: ReviewCategory,
    /// Expected effort.
    pub duration: String,
    /// Payout.
    pub reward: Reward,
    /// Submission deadline.
    pub deadline: DateTime<Utc>,
    /// Conditions the worker must meet.
    #[serde(default)]
    pub requirements: Vec<String>,
    /// Things the worker must not do.
    #[serde(default)]
    pub restrictions: Vec<String>,
    /// How the visit is proven.
    #[serde(default)]
    pub verification_method: String,
}

impl From<&Review> for ReviewSnapshot {
    fn from(review: &Review) -> Self {
        Self {
            business_name: review.business_name().to_owned(),
            region: review.region().to_owned(),
            content: review.content().to_owned(),
            full_description: review.full_description().to_owned(),
            image_url: review.image_url().map(str::to_owned),
            category: review.category(),
            duration: review.duration().to_owned(),
            reward: review.reward(),
            deadline: review.deadline(),
            requirements: review.requirements().to_vec(),
            restrictions: review.restrictions().to_vec(),
            verification_method: review.verification_method().to_owned(),
        }
    }
}
