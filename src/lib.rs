//! Reviewhub: a paid review-writing marketplace.
//!
//! Businesses post review jobs; workers claim one job at a time per
//! posting, write the review, attach photos and screenshots, and submit it
//! for approval. Every piece of state lives in an external key-value store,
//! and each posting can be claimed by exactly one worker even under
//! concurrent requests.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure types and invariants with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external collaborators
//! - **Adapters**: Concrete implementations of ports (memory, `PostgreSQL`,
//!   filesystem)
//! - **Services**: Orchestration over ports
//!
//! # Modules
//!
//! - [`storage`]: Key-value store port and adapters
//! - [`catalog`]: Review postings, filtering, and sample seeding
//! - [`task`]: Task ledger, claim arbitration, and reconciliation
//! - [`identity`]: Identity verification, accounts, and profiles
//! - [`media`]: Uploaded files and signed download links
//! - [`api`]: HTTP surface

pub mod api;
pub mod catalog;
pub mod identity;
pub mod media;
pub mod storage;
pub mod task;
