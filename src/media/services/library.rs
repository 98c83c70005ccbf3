//! Upload and signed-download orchestration.

use super::signing::{LinkCheck, UrlSigner};
use crate::identity::domain::UserId;
use crate::media::{
    domain::{MediaDomainError, ObjectKey, UploadCategory, sanitize_file_name},
    ports::{ObjectStore, ObjectStoreError},
};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Hex characters of random nonce embedded in each upload path.
const UPLOAD_NONCE_LEN: usize = 12;

/// Service-level errors for media operations.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The uploaded file has no content.
    #[error("uploaded file is empty")]
    EmptyUpload,

    /// No object exists at the requested location.
    #[error("file not found")]
    NotFound,

    /// The download link has expired.
    #[error("download link has expired")]
    LinkExpired,

    /// The download link signature does not match.
    #[error("download link signature is invalid")]
    InvalidSignature,

    /// The signing secret was rejected.
    #[error("media signing key is unusable")]
    SigningKey,

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] MediaDomainError),

    /// Object store operation failed.
    #[error(transparent)]
    Store(#[from] ObjectStoreError),
}

/// Result type for media service operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Location and signed link of a stored upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredObject {
    /// Path inside the bucket.
    pub path: String,
    /// Signed download link.
    pub url: String,
}

/// Media library over an object store.
pub struct MediaLibrary<O, C>
where
    O: ObjectStore + ?Sized,
    C: Clock + Send + Sync,
{
    store: Arc<O>,
    signer: Arc<UrlSigner>,
    clock: Arc<C>,
}

impl<O, C> Clone for MediaLibrary<O, C>
where
    O: ObjectStore + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            signer: Arc::clone(&self.signer),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<O, C> MediaLibrary<O, C>
where
    O: ObjectStore + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a media library.
    #[must_use]
    pub fn new(store: Arc<O>, signer: UrlSigner, clock: Arc<C>) -> Self {
        Self {
            store,
            signer: Arc::new(signer),
            clock,
        }
    }

    /// Stores an upload under `<owner>/<epochMillis>-<nonce>-<file name>` in
    /// the category's bucket and returns a signed link to it.
    ///
    /// The random nonce keeps uploads of the same file name in the same
    /// millisecond apart.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::EmptyUpload`] for an empty payload or
    /// [`MediaError::Store`] when the write fails.
    pub async fn upload(
        &self,
        category: UploadCategory,
        owner: &UserId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> MediaResult<StoredObject> {
        if bytes.is_empty() {
            return Err(MediaError::EmptyUpload);
        }
        let nonce = Uuid::new_v4().simple().to_string();
        let path = format!(
            "{owner}/{}-{}-{}",
            self.clock.utc().timestamp_millis(),
            nonce.get(..UPLOAD_NONCE_LEN).unwrap_or(&nonce),
            sanitize_file_name(file_name)
        );
        let key = ObjectKey::new(category, path)?;
        let size = bytes.len();
        self.store.put(&key, bytes).await?;
        tracing::info!(object = %key, owner = %owner, size, "stored upload");
        Ok(StoredObject {
            url: self.signed_url(&key),
            path: key.path().to_owned(),
        })
    }

    /// Returns a fresh signed link to `key`.
    #[must_use]
    pub fn signed_url(&self, key: &ObjectKey) -> String {
        self.signer.signed_url(key, self.clock.utc())
    }

    /// Resolves a signed link back to the stored bytes.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::InvalidSignature`] or [`MediaError::LinkExpired`]
    /// for a bad link, and [`MediaError::NotFound`] when the location is
    /// malformed or empty.
    pub async fn open(
        &self,
        bucket: &str,
        path: &str,
        expires: i64,
        signature: &str,
    ) -> MediaResult<Vec<u8>> {
        let key = ObjectKey::parse(bucket, path).map_err(|_| MediaError::NotFound)?;
        match self
            .signer
            .check(&key, expires, signature, self.clock.utc())
        {
            LinkCheck::Valid => {}
            LinkCheck::Expired => return Err(MediaError::LinkExpired),
            LinkCheck::BadSignature => return Err(MediaError::InvalidSignature),
        }
        self.store.get(&key).await?.ok_or(MediaError::NotFound)
    }
}
