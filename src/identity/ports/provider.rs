//! Identity provider port.

use crate::identity::domain::{
    AccessToken, Credentials, Email, Identity, IdentityDomainError, Registration, Session,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity provider operations.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Authentication provider contract.
///
/// Implementations own credentials and token issuance. Callers only ever see
/// the verified [`Identity`].
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolves a bearer token to the identity it was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidToken`] when the token is malformed,
    /// expired, or was not issued by this provider.
    async fn verify(&self, token: &AccessToken) -> IdentityResult<Identity>;

    /// Creates a new account.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::EmailTaken`] when the address is already
    /// registered.
    async fn register(&self, registration: Registration) -> IdentityResult<Identity>;

    /// Exchanges credentials for a session.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidCredentials`] when the account does
    /// not exist or the password does not match.
    async fn sign_in(&self, credentials: Credentials) -> IdentityResult<Session>;
}

/// Errors returned by identity provider implementations.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// The bearer token could not be verified.
    #[error("invalid or expired access token")]
    InvalidToken,

    /// Email and password do not match a known account.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The email address already belongs to an account.
    #[error("email already registered: {0}")]
    EmailTaken(Email),

    /// Supplied values failed validation.
    #[error(transparent)]
    Validation(#[from] IdentityDomainError),

    /// The provider could not complete the request.
    #[error("identity provider unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityError {
    /// Wraps a provider-side failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
