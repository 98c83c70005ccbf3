//! In-memory object store for tests and ephemeral deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::media::{
    domain::ObjectKey,
    ports::{ObjectStore, ObjectStoreError, ObjectStoreResult},
};

/// Thread-safe in-memory object store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryObjectStore {
    objects: Arc<RwLock<HashMap<ObjectKey, Vec<u8>>>>,
}

impl InMemoryObjectStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(err: E) -> ObjectStoreError {
    ObjectStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(&self, key: &ObjectKey, bytes: Vec<u8>) -> ObjectStoreResult<()> {
        let mut objects = self.objects.write().map_err(poisoned)?;
        objects.insert(key.clone(), bytes);
        Ok(())
    }

    async fn get(&self, key: &ObjectKey) -> ObjectStoreResult<Option<Vec<u8>>> {
        let objects = self.objects.read().map_err(poisoned)?;
        Ok(objects.get(key).cloned())
    }
}
