//! Error types for identity value validation.

use thiserror::Error;

/// Errors returned while constructing identity values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The user identifier is empty, too long, or contains unsupported
    /// characters.
    #[error("invalid user id '{0}'")]
    InvalidUserId(String),

    /// The email address is malformed.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The display name is empty after trimming.
    #[error("name must not be empty")]
    EmptyName,

    /// The password is shorter than the accepted minimum.
    #[error("password must be at least {min_length} characters long")]
    PasswordTooShort {
        /// Minimum accepted length in characters.
        min_length: usize,
    },
}
