//! Identity provider implementations.

pub mod local;
mod password;

pub use local::{LocalIdentityProvider, TokenSettings};
