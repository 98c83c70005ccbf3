//! Uploaded media: object storage and signed download links.
//!
//! Files flow from the client into an [`ports::ObjectStore`]; only the
//! returned link is ever persisted with a task. Links are signed with
//! HMAC-SHA256 and expire, so stored objects are never publicly listable.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Upload and link services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
