//! Object store port.

use crate::media::domain::ObjectKey;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for object store operations.
pub type ObjectStoreResult<T> = Result<T, ObjectStoreError>;

/// Binary object persistence contract.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `bytes` under `key`, replacing any previous object.
    async fn put(&self, key: &ObjectKey, bytes: Vec<u8>) -> ObjectStoreResult<()>;

    /// Reads the object stored under `key`.
    ///
    /// Returns `None` when no object exists.
    async fn get(&self, key: &ObjectKey) -> ObjectStoreResult<Option<Vec<u8>>>;
}

/// Errors returned by object store implementations.
#[derive(Debug, Clone, Error)]
pub enum ObjectStoreError {
    /// Persistence-layer failure.
    #[error("object store error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ObjectStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
