//! Object store rooted in a capability directory.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;
use std::sync::Arc;

use crate::media::{
    domain::ObjectKey,
    ports::{ObjectStore, ObjectStoreError, ObjectStoreResult},
};

/// Object store that keeps each bucket as a directory under one root.
///
/// All access goes through a `cap-std` directory handle, so no key can
/// reach outside the root.
#[derive(Debug, Clone)]
pub struct FilesystemObjectStore {
    root: Arc<Dir>,
}

impl FilesystemObjectStore {
    /// Opens (creating if needed) the root directory.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectStoreError::Persistence`] when the directory cannot
    /// be created or opened.
    pub fn open(root: &Utf8Path) -> ObjectStoreResult<Self> {
        Dir::create_ambient_dir_all(root, ambient_authority())
            .map_err(ObjectStoreError::persistence)?;
        let dir =
            Dir::open_ambient_dir(root, ambient_authority()).map_err(ObjectStoreError::persistence)?;
        Ok(Self {
            root: Arc::new(dir),
        })
    }

    async fn run_blocking<F, T>(&self, f: F) -> ObjectStoreResult<T>
    where
        F: FnOnce(&Dir) -> std::io::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let root = Arc::clone(&self.root);
        tokio::task::spawn_blocking(move || f(&root))
            .await
            .map_err(ObjectStoreError::persistence)?
            .map_err(ObjectStoreError::persistence)
    }
}

fn relative_path(key: &ObjectKey) -> Utf8PathBuf {
    Utf8PathBuf::from(key.bucket()).join(key.path())
}

#[async_trait]
impl ObjectStore for FilesystemObjectStore {
    async fn put(&self, key: &ObjectKey, bytes: Vec<u8>) -> ObjectStoreResult<()> {
        let path = relative_path(key);
        self.run_blocking(move |root| {
            if let Some(parent) = path.parent() {
                root.create_dir_all(parent)?;
            }
            root.write(&path, bytes)
        })
        .await
    }

    async fn get(&self, key: &ObjectKey) -> ObjectStoreResult<Option<Vec<u8>>> {
        let path = relative_path(key);
        self.run_blocking(move |root| match root.read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        })
        .await
    }
}
