//! Self-contained identity provider issuing HS256 access tokens.
//!
//! Accounts live in process memory and passwords are stored as Argon2id
//! hashes. Suitable for development, tests, and single-node deployments.

use super::password::{hash_password, verify_password};
use crate::identity::{
    domain::{AccessToken, Credentials, DisplayName, Email, Identity, Registration, Session, UserId},
    ports::{IdentityError, IdentityProvider, IdentityResult},
};
use async_trait::async_trait;
use chrono::Duration;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Signing secret and lifetime of issued access tokens.
#[derive(Clone)]
pub struct TokenSettings {
    secret: String,
    ttl: Duration,
}

impl TokenSettings {
    /// Creates token settings.
    #[must_use]
    pub fn new(secret: impl Into<String>, ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }
}

impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    name: String,
    iat: i64,
    exp: i64,
    jti: String,
}

#[derive(Debug, Clone)]
struct Account {
    identity: Identity,
    password_hash: String,
}

/// In-process identity provider.
#[derive(Clone)]
pub struct LocalIdentityProvider<C>
where
    C: Clock + Send + Sync,
{
    accounts: Arc<RwLock<HashMap<Email, Account>>>,
    settings: Arc<TokenSettings>,
    clock: Arc<C>,
}

impl<C> LocalIdentityProvider<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a provider with no accounts.
    #[must_use]
    pub fn new(settings: TokenSettings, clock: Arc<C>) -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            settings: Arc::new(settings),
            clock,
        }
    }

    fn issue_token(&self, identity: &Identity) -> IdentityResult<AccessToken> {
        let issued_at = self.clock.utc();
        let claims = Claims {
            sub: identity.id.as_str().to_owned(),
            email: identity.email.as_str().to_owned(),
            name: identity.name.as_str().to_owned(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.settings.ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.settings.secret.as_bytes()),
        )
        .map_err(IdentityError::unavailable)?;
        Ok(AccessToken::new(token))
    }

    fn decode_claims(&self, token: &AccessToken) -> IdentityResult<Claims> {
        decode::<Claims>(
            token.as_str(),
            &DecodingKey::from_secret(self.settings.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|err| {
            tracing::debug!(error = %err, "rejected access token");
            IdentityError::InvalidToken
        })
    }

    fn find_account(&self, email: &Email) -> IdentityResult<Option<Account>> {
        let accounts = self.accounts.read().map_err(poisoned)?;
        Ok(accounts.get(email).cloned())
    }
}

fn poisoned<E: fmt::Display>(err: E) -> IdentityError {
    IdentityError::unavailable(std::io::Error::other(err.to_string()))
}

fn identity_from_claims(claims: Claims) -> Option<Identity> {
    Some(Identity {
        id: UserId::new(claims.sub).ok()?,
        email: Email::new(claims.email).ok()?,
        name: DisplayName::new(claims.name).ok()?,
    })
}

#[async_trait]
impl<C> IdentityProvider for LocalIdentityProvider<C>
where
    C: Clock + Send + Sync,
{
    async fn verify(&self, token: &AccessToken) -> IdentityResult<Identity> {
        let claims = self.decode_claims(token)?;
        let identity = identity_from_claims(claims).ok_or(IdentityError::InvalidToken)?;
        let account = self
            .find_account(&identity.email)?
            .ok_or(IdentityError::InvalidToken)?;
        if account.identity.id != identity.id {
            return Err(IdentityError::InvalidToken);
        }
        Ok(account.identity)
    }

    async fn register(&self, registration: Registration) -> IdentityResult<Identity> {
        let password = registration.password().to_owned();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(IdentityError::unavailable)?
            .map_err(IdentityError::unavailable)?;

        let identity = Identity {
            id: UserId::generate(),
            email: registration.email().clone(),
            name: registration.name().clone(),
        };

        let mut accounts = self.accounts.write().map_err(poisoned)?;
        if accounts.contains_key(&identity.email) {
            return Err(IdentityError::EmailTaken(identity.email));
        }
        accounts.insert(
            identity.email.clone(),
            Account {
                identity: identity.clone(),
                password_hash,
            },
        );
        drop(accounts);

        tracing::info!(user_id = %identity.id, "registered account");
        Ok(identity)
    }

    async fn sign_in(&self, credentials: Credentials) -> IdentityResult<Session> {
        let account = self
            .find_account(credentials.email())?
            .ok_or(IdentityError::InvalidCredentials)?;

        let password = credentials.password().to_owned();
        let stored_hash = account.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
            .await
            .map_err(IdentityError::unavailable)?
            .map_err(IdentityError::unavailable)?;
        if !matches {
            return Err(IdentityError::InvalidCredentials);
        }

        let access_token = self.issue_token(&account.identity)?;
        Ok(Session {
            access_token,
            identity: account.identity,
        })
    }
}
