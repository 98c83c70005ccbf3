//! Review catalog: posted review tasks and their availability.
//!
//! Reviews are published by seeding or administration and flipped from
//! `available` to `assigned` exactly once, by the claim arbitrator in
//! [`crate::task`]. Presentation concerns (category and region filters,
//! ordering) are expressed as a [`domain::ReviewQuery`] applied on top of
//! [`services::ReviewCatalog::list_available`].
//!
//! - Domain types in [`domain`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
