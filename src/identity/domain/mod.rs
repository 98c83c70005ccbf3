//! Domain model for identities and credentials.

mod error;
mod identity;
mod ids;

pub use error::IdentityDomainError;
pub use identity::{AccessToken, Credentials, DisplayName, Email, Identity, Registration, Session};
pub use ids::UserId;
