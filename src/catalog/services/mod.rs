//! Catalog orchestration services.

mod catalog;
mod samples;

pub use catalog::{CatalogError, CatalogResult, ReviewCatalog, SeedOutcome};
