//! Object addressing inside the store.

use super::{MediaDomainError, UploadCategory};
use std::fmt;

const MAX_PATH_LENGTH: usize = 512;
const MAX_FILE_NAME_LENGTH: usize = 100;
const FALLBACK_FILE_NAME: &str = "upload";

const fn is_safe_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-')
}

/// Location of a stored object: a bucket plus a relative path.
///
/// Paths are `/`-separated segments of ASCII alphanumerics, `.`, `_` and
/// `-`; `.` and `..` segments are rejected, so a key can never resolve
/// outside its bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    category: UploadCategory,
    path: String,
}

impl ObjectKey {
    /// Creates a validated key.
    ///
    /// # Errors
    ///
    /// Returns [`MediaDomainError::InvalidPath`] when the path is empty,
    /// too long, has an empty, `.` or `..` segment, or contains an unsafe
    /// character.
    pub fn new(category: UploadCategory, path: impl Into<String>) -> Result<Self, MediaDomainError> {
        let raw = path.into();
        let is_valid = !raw.is_empty()
            && raw.len() <= MAX_PATH_LENGTH
            && raw.split('/').all(|segment| {
                !segment.is_empty()
                    && segment != "."
                    && segment != ".."
                    && segment.chars().all(is_safe_char)
            });
        if !is_valid {
            return Err(MediaDomainError::InvalidPath(raw));
        }
        Ok(Self { category, path: raw })
    }

    /// Creates a key from a bucket name and path, as found in a link.
    ///
    /// # Errors
    ///
    /// Returns [`MediaDomainError::UnknownBucket`] or
    /// [`MediaDomainError::InvalidPath`].
    pub fn parse(bucket: &str, path: &str) -> Result<Self, MediaDomainError> {
        Self::new(UploadCategory::from_bucket(bucket)?, path)
    }

    /// Returns the category.
    #[must_use]
    pub const fn category(&self) -> UploadCategory {
        self.category
    }

    /// Returns the bucket name.
    #[must_use]
    pub const fn bucket(&self) -> &'static str {
        self.category.bucket()
    }

    /// Returns the path inside the bucket.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket(), self.path)
    }
}

/// Reduces a client-supplied file name to a safe path segment.
///
/// Directory components are dropped, unsafe characters become `_`, and an
/// empty result falls back to `upload`.
#[must_use]
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|ch| if is_safe_char(ch) { ch } else { '_' })
        .take(MAX_FILE_NAME_LENGTH)
        .collect();
    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        return FALLBACK_FILE_NAME.to_owned();
    }
    trimmed.to_owned()
}
