//! Identity, credential, and session values.

use super::{IdentityDomainError, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalised email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Creates a normalised, lower-cased email address.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::InvalidEmail`] when the value lacks a
    /// local part or a domain, or contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();
        let is_valid = !normalized.chars().any(char::is_whitespace)
            && normalized
                .split_once('@')
                .is_some_and(|(local, domain)| {
                    !local.is_empty() && !domain.is_empty() && !domain.contains('@')
                });
        if !is_valid {
            return Err(IdentityDomainError::InvalidEmail(raw));
        }
        Ok(Self(normalized))
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = IdentityDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Human-readable account name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Creates a trimmed, non-empty display name.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyName`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdentityDomainError::EmptyName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = IdentityDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

/// Verified identity as issued by the authentication provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable user identifier.
    pub id: UserId,
    /// Account email address.
    pub email: Email,
    /// Display name.
    pub name: DisplayName,
}

/// Validated sign-up request.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    email: Email,
    password: String,
    name: DisplayName,
}

impl Registration {
    /// Shortest password the provider accepts.
    pub const MIN_PASSWORD_LENGTH: usize = 6;

    /// Validates sign-up fields.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError`] when the email or name is invalid or
    /// the password is shorter than [`Self::MIN_PASSWORD_LENGTH`].
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, IdentityDomainError> {
        let email = Email::new(email)?;
        let password = password.into();
        if password.chars().count() < Self::MIN_PASSWORD_LENGTH {
            return Err(IdentityDomainError::PasswordTooShort {
                min_length: Self::MIN_PASSWORD_LENGTH,
            });
        }
        let name = DisplayName::new(name)?;
        Ok(Self {
            email,
            password,
            name,
        })
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Returns the plaintext password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &DisplayName {
        &self.name
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

/// Email and password presented at sign-in.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: Email,
    password: String,
}

impl Credentials {
    /// Creates sign-in credentials.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::InvalidEmail`] for a malformed address.
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, IdentityDomainError> {
        Ok(Self {
            email: Email::new(email)?,
            password: password.into(),
        })
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Returns the plaintext password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Opaque bearer credential.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw bearer token.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Result of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Bearer token for subsequent requests.
    pub access_token: AccessToken,
    /// Identity the token was issued for.
    pub identity: Identity,
}
