//! `PostgreSQL` key-value store implementation.

use super::{models::NewEntryRow, schema::kv_store};
use crate::storage::ports::{KeyValueError, KeyValueResult, KeyValueStore};
use async_trait::async_trait;
use chrono::Utc;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::upsert::excluded;
use serde_json::Value;

/// `PostgreSQL` connection pool type used by the key-value adapter.
pub type KeyValuePgPool = Pool<ConnectionManager<PgConnection>>;

/// Idempotent DDL for the backing table.
pub const SCHEMA_SQL: &str = concat!(
    "CREATE TABLE IF NOT EXISTS kv_store (",
    "key TEXT PRIMARY KEY, ",
    "value JSONB NOT NULL, ",
    "seq BIGSERIAL NOT NULL, ",
    "updated_at TIMESTAMPTZ NOT NULL DEFAULT now()",
    "); ",
    "CREATE INDEX IF NOT EXISTS idx_kv_store_seq ON kv_store (seq);",
);

const LIKE_ESCAPE: char = '\\';

/// `PostgreSQL`-backed key-value store.
#[derive(Debug, Clone)]
pub struct PostgresKeyValueStore {
    pool: KeyValuePgPool,
}

impl PostgresKeyValueStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: KeyValuePgPool) -> Self {
        Self { pool }
    }

    /// Builds a connection pool for `database_url` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueError::Persistence`] when the pool cannot be built.
    pub fn connect(database_url: &str, max_size: u32) -> KeyValueResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(max_size)
            .build(manager)
            .map_err(KeyValueError::persistence)?;
        Ok(Self::new(pool))
    }

    /// Creates the backing table when it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueError::Persistence`] when the DDL fails.
    pub async fn ensure_schema(&self) -> KeyValueResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(SCHEMA_SQL)
                .map_err(KeyValueError::persistence)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> KeyValueResult<T>
    where
        F: FnOnce(&mut PgConnection) -> KeyValueResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(KeyValueError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(KeyValueError::persistence)?
    }
}

#[async_trait]
impl KeyValueStore for PostgresKeyValueStore {
    async fn get(&self, key: &str) -> KeyValueResult<Option<Value>> {
        let lookup_key = key.to_owned();
        self.run_blocking(move |connection| {
            kv_store::table
                .filter(kv_store::key.eq(lookup_key))
                .select(kv_store::value)
                .first::<Value>(connection)
                .optional()
                .map_err(KeyValueError::persistence)
        })
        .await
    }

    async fn set(&self, key: &str, value: Value) -> KeyValueResult<()> {
        let row = NewEntryRow {
            key: key.to_owned(),
            value,
            updated_at: Utc::now(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(kv_store::table)
                .values(&row)
                .on_conflict(kv_store::key)
                .do_update()
                .set((
                    kv_store::value.eq(excluded(kv_store::value)),
                    kv_store::updated_at.eq(excluded(kv_store::updated_at)),
                ))
                .execute(connection)
                .map_err(KeyValueError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn get_by_prefix(&self, prefix: &str) -> KeyValueResult<Vec<Value>> {
        let pattern = format!("{}%", escape_like(prefix));
        self.run_blocking(move |connection| {
            kv_store::table
                .filter(kv_store::key.like(pattern).escape(LIKE_ESCAPE))
                .order(kv_store::seq.asc())
                .select(kv_store::value)
                .load::<Value>(connection)
                .map_err(KeyValueError::persistence)
        })
        .await
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<Value>,
        new: Value,
    ) -> KeyValueResult<bool> {
        let row = NewEntryRow {
            key: key.to_owned(),
            value: new,
            updated_at: Utc::now(),
        };
        self.run_blocking(move |connection| {
            let affected = match expected {
                None => diesel::insert_into(kv_store::table)
                    .values(&row)
                    .on_conflict_do_nothing()
                    .execute(connection),
                Some(previous) => {
                    let NewEntryRow {
                        key: target_key,
                        value: replacement,
                        updated_at,
                    } = row;
                    diesel::update(
                        kv_store::table
                            .filter(kv_store::key.eq(target_key))
                            .filter(kv_store::value.eq(previous)),
                    )
                    .set((
                        kv_store::value.eq(replacement),
                        kv_store::updated_at.eq(updated_at),
                    ))
                    .execute(connection)
                }
            }
            .map_err(KeyValueError::persistence)?;
            Ok(affected == 1)
        })
        .await
    }
}

/// Escapes `LIKE` wildcards so the prefix is matched literally.
fn escape_like(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len());
    for ch in prefix.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}
