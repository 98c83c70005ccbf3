//! Mirrors registered identities into the key-value store.

use crate::identity::domain::{DisplayName, Email, Identity, UserId};
use crate::storage::{
    keys,
    ports::{KeyValueResult, KeyValueStore, encode},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Profile record stored under `user:<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User identifier.
    pub id: UserId,
    /// Account email address.
    pub email: Email,
    /// Display name.
    pub name: DisplayName,
    /// When the profile was first recorded.
    pub created_at: DateTime<Utc>,
}

/// Profile mirror over the key-value store.
pub struct ProfileDirectory<S, C>
where
    S: KeyValueStore + ?Sized,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> Clone for ProfileDirectory<S, C>
where
    S: KeyValueStore + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, C> ProfileDirectory<S, C>
where
    S: KeyValueStore + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a profile directory.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Writes the profile of a freshly registered identity.
    ///
    /// # Errors
    ///
    /// Returns a store error when the write fails.
    pub async fn record(&self, identity: &Identity) -> KeyValueResult<UserProfile> {
        let profile = UserProfile {
            id: identity.id.clone(),
            email: identity.email.clone(),
            name: identity.name.clone(),
            created_at: self.clock.utc(),
        };
        let key = keys::user(profile.id.as_str());
        self.store.set(&key, encode(&key, &profile)?).await?;
        Ok(profile)
    }
}
