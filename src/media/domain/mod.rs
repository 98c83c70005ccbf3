//! Domain model for stored media.

mod category;
mod error;
mod key;

pub use category::UploadCategory;
pub use error::MediaDomainError;
pub use key::{ObjectKey, sanitize_file_name};
