//! Task ledger and claim arbitration.
//!
//! A task is one worker's claim on one review. Claims are arbitrated by a
//! per-review claim row written with a set-if-absent conditional write, so at
//! most one task ever exists per review. Tasks then move monotonically
//! through `writing`, `submitted`, `pending_approval` and `approved`. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Orchestration services in [`services`]
//!
//! Persistence goes through [`crate::storage::ports::KeyValueStore`].

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
