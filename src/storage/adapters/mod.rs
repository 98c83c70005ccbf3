//! Adapter implementations for key-value persistence.

pub mod memory;
pub mod postgres;
