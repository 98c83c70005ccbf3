//! Domain model for review postings.

mod error;
mod ids;
mod query;
mod review;

pub use error::CatalogDomainError;
pub use ids::ReviewId;
pub use query::{ReviewQuery, ReviewSort};
pub use review::{NewReview, Review, ReviewCategory, ReviewStatus, Reward};
