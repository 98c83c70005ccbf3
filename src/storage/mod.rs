//! Durable key-value persistence for every other context.
//!
//! All marketplace state lives behind the [`ports::KeyValueStore`] contract:
//! JSON documents addressed by string keys, scanned by prefix in insertion
//! order, with a single conditional-write primitive used for claim
//! arbitration. Record keys are built exclusively through [`keys`].
//!
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod keys;
pub mod ports;
