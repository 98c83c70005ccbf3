//! HTTP handlers grouped by resource.

pub mod accounts;
pub mod files;
pub mod health;
pub mod reviews;
pub mod tasks;

use super::error::AppError;

/// Fallback for unrouted paths.
pub async fn not_found() -> AppError {
    AppError::NotFound("Endpoint not found".to_owned())
}
