//! Shared helpers for `PostgreSQL` integration tests.

use std::sync::Arc;

use reviewhub::storage::adapters::postgres::PostgresKeyValueStore;
use uuid::Uuid;

/// Pool size used by the tests.
const POOL_SIZE: u32 = 4;

/// Connects to `DATABASE_URL` and prepares the schema.
///
/// Returns `None` when the variable is unset so callers can skip.
#[expect(clippy::print_stderr, reason = "report skipped tests to the runner")]
pub async fn connect() -> Option<Arc<PostgresKeyValueStore>> {
    let Some(url) = std::env::var("DATABASE_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
    else {
        eprintln!("DATABASE_URL unset; skipping PostgreSQL test");
        return None;
    };
    let store = PostgresKeyValueStore::connect(&url, POOL_SIZE).expect("pool builds");
    store.ensure_schema().await.expect("schema applies");
    Some(Arc::new(store))
}

/// Returns a namespace unique to one test run.
pub fn namespace() -> String {
    format!("t{}", Uuid::new_v4().simple())
}
