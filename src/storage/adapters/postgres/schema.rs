//! Diesel schema for key-value persistence.

diesel::table! {
    /// JSON documents addressed by string key.
    kv_store (key) {
        /// Record key.
        key -> Text,
        /// JSON document.
        value -> Jsonb,
        /// Insertion sequence fixing the order of prefix scans.
        seq -> Int8,
        /// Last write timestamp.
        updated_at -> Timestamptz,
    }
}
