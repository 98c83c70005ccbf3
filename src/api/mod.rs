//! HTTP surface over the catalog, task ledger, identity, and media services.
//!
//! The surface authenticates callers, validates request shapes, invokes one
//! service operation, and translates the outcome into a status code and a
//! JSON body. It holds no business rules of its own.
//!
//! - Configuration in [`config`]
//! - Error translation in [`error`]
//! - Route table and middleware in [`router`]

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::{AppConfig, ConfigError, CorsOrigins, LogFormat, SubmissionLimits};
pub use error::{AppError, AppResult};
pub use router::build_router;
pub use state::{AppState, BootstrapError};

#[cfg(test)]
mod tests;
