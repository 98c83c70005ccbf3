//! Diesel row models for key-value persistence.

use super::schema::kv_store;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Insert model for key-value entries.
///
/// The insertion sequence is assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = kv_store)]
pub struct NewEntryRow {
    /// Record key.
    pub key: String,
    /// JSON document.
    pub value: Value,
    /// Write timestamp.
    pub updated_at: DateTime<Utc>,
}
