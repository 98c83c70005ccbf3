//! `PostgreSQL` adapter for key-value persistence.

mod models;
mod schema;
mod store;

pub use store::{KeyValuePgPool, PostgresKeyValueStore, SCHEMA_SQL};
