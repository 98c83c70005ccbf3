//! Upload and download services.

mod library;
mod signing;

pub use library::{MediaError, MediaLibrary, MediaResult, StoredObject};
pub use signing::UrlSigner;
