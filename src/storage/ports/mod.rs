//! Port contracts for key-value persistence.

pub mod key_value;

pub use key_value::{KeyValueError, KeyValueResult, KeyValueStore, decode, encode};
