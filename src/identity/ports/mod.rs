//! Port contracts for identity verification and account management.

mod provider;

pub use provider::{IdentityError, IdentityProvider, IdentityResult};
