//! Worker identities issued by the authentication provider.
//!
//! The marketplace never owns credentials itself: it asks an
//! [`ports::IdentityProvider`] to verify bearer tokens and to register or
//! sign in accounts, and mirrors the resulting profile into the key-value
//! store.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Profile mirroring in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
