//! Key-value store port used by the catalog, ledger, and profile services.

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Result type for key-value store operations.
pub type KeyValueResult<T> = Result<T, KeyValueError>;

/// Key-value persistence contract.
///
/// The store offers no multi-key transactions. The only atomic primitive is
/// [`KeyValueStore::compare_and_swap`], which applies to a single key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns `None` when the key is absent.
    async fn get(&self, key: &str) -> KeyValueResult<Option<Value>>;

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// Overwriting an existing key keeps its original insertion position.
    async fn set(&self, key: &str, value: Value) -> KeyValueResult<()>;

    /// Returns every value whose key starts with `prefix`, ordered by the
    /// first insertion of each key.
    async fn get_by_prefix(&self, prefix: &str) -> KeyValueResult<Vec<Value>>;

    /// Writes `new` under `key` only when the stored value matches
    /// `expected`.
    ///
    /// `expected = None` requires the key to be absent. Returns `true` when
    /// the write was applied and `false` when the precondition failed.
    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<Value>,
        new: Value,
    ) -> KeyValueResult<bool>;
}

/// Errors returned by key-value store implementations.
#[derive(Debug, Clone, Error)]
pub enum KeyValueError {
    /// A record could not be converted to or from its JSON representation.
    #[error("record encoding error for key '{key}': {source}")]
    Encoding {
        /// Key of the offending record.
        key: String,
        /// Underlying serde failure.
        source: Arc<serde_json::Error>,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl KeyValueError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    fn encoding(key: &str, err: serde_json::Error) -> Self {
        Self::Encoding {
            key: key.to_owned(),
            source: Arc::new(err),
        }
    }
}

/// Serialises a typed record into the JSON value stored under `key`.
///
/// # Errors
///
/// Returns [`KeyValueError::Encoding`] when serialisation fails.
pub fn encode<T: Serialize>(key: &str, record: &T) -> KeyValueResult<Value> {
    serde_json::to_value(record).map_err(|err| KeyValueError::encoding(key, err))
}

/// Deserialises the JSON value stored under `key` into a typed record.
///
/// # Errors
///
/// Returns [`KeyValueError::Encoding`] when the stored document does not
/// match the expected shape.
pub fn decode<T: DeserializeOwned>(key: &str, value: Value) -> KeyValueResult<T> {
    serde_json::from_value(value).map_err(|err| KeyValueError::encoding(key, err))
}
