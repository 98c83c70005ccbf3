//! Port contracts for binary object storage.

mod object_store;

pub use object_store::{ObjectStore, ObjectStoreError, ObjectStoreResult};
