//! In-memory key-value store for tests and single-process deployments.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::storage::ports::{KeyValueError, KeyValueResult, KeyValueStore};

/// Thread-safe in-memory key-value store.
///
/// Conditional writes run under the write lock, so
/// [`KeyValueStore::compare_and_swap`] is atomic with respect to every other
/// operation on the same store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    state: Arc<RwLock<InMemoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    entries: HashMap<String, Entry>,
    next_sequence: u64,
}

#[derive(Debug)]
struct Entry {
    sequence: u64,
    value: Value,
}

impl InMemoryState {
    fn upsert(&mut self, key: &str, value: Value) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.value = value;
            return;
        }
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.saturating_add(1);
        self.entries.insert(key.to_owned(), Entry { sequence, value });
    }
}

impl InMemoryKeyValueStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(err: E) -> KeyValueError {
    KeyValueError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> KeyValueResult<Option<Value>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.entries.get(key).map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: Value) -> KeyValueResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.upsert(key, value);
        Ok(())
    }

    async fn get_by_prefix(&self, prefix: &str) -> KeyValueResult<Vec<Value>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut matches: Vec<&Entry> = state
            .entries
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(_, entry)| entry)
            .collect();
        matches.sort_by_key(|entry| entry.sequence);
        Ok(matches.into_iter().map(|entry| entry.value.clone()).collect())
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<Value>,
        new: Value,
    ) -> KeyValueResult<bool> {
        let mut state = self.state.write().map_err(poisoned)?;
        let current = state.entries.get(key).map(|entry| &entry.value);
        if current != expected.as_ref() {
            return Ok(false);
        }
        state.upsert(key, new);
        Ok(true)
    }
}
