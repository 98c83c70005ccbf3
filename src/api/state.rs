//! Shared application state and start-up wiring.

use super::config::{AppConfig, SubmissionLimits};
use crate::catalog::services::{CatalogError, ReviewCatalog, SeedOutcome};
use crate::identity::{
    adapters::{LocalIdentityProvider, TokenSettings},
    ports::IdentityProvider,
    services::ProfileDirectory,
};
use crate::media::{
    adapters::{FilesystemObjectStore, InMemoryObjectStore},
    ports::{ObjectStore, ObjectStoreError},
    services::{MediaError, MediaLibrary, UrlSigner},
};
use crate::storage::{
    adapters::{memory::InMemoryKeyValueStore, postgres::PostgresKeyValueStore},
    ports::{KeyValueError, KeyValueStore},
};
use crate::task::services::{TaskLedger, TaskLedgerError};
use mockable::DefaultClock;
use std::sync::Arc;
use thiserror::Error;

/// Key-value store shared by every service.
pub type SharedStore = dyn KeyValueStore;

/// Object store behind the media library.
pub type SharedObjects = dyn ObjectStore;

/// Failures while assembling the application at start-up.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The key-value store could not be opened or prepared.
    #[error("key-value store: {0}")]
    Store(#[from] KeyValueError),

    /// The object store could not be opened.
    #[error("object store: {0}")]
    Objects(#[from] ObjectStoreError),

    /// The media signer could not be built.
    #[error("media: {0}")]
    Media(#[from] MediaError),

    /// Claim reconciliation failed.
    #[error("reconciliation: {0}")]
    Reconcile(#[from] TaskLedgerError),

    /// Sample seeding failed.
    #[error("seeding: {0}")]
    Seed(#[from] CatalogError),
}

/// Services available to every handler through `State<AppState>`.
///
/// Cloning is cheap: every service holds its collaborators behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Review catalog.
    pub catalog: ReviewCatalog<SharedStore, DefaultClock>,
    /// Task ledger and claim arbitrator.
    pub ledger: TaskLedger<SharedStore, DefaultClock>,
    /// Profile mirror.
    pub profiles: ProfileDirectory<SharedStore, DefaultClock>,
    /// Uploads and signed links.
    pub media: MediaLibrary<SharedObjects, DefaultClock>,
    /// Identity verifier.
    pub identity: Arc<dyn IdentityProvider>,
    /// Submission bounds.
    pub limits: SubmissionLimits,
}

impl AppState {
    /// Wires the services over the given collaborators.
    #[must_use]
    pub fn new(
        store: Arc<SharedStore>,
        objects: Arc<SharedObjects>,
        identity: Arc<dyn IdentityProvider>,
        signer: UrlSigner,
        limits: SubmissionLimits,
    ) -> Self {
        let clock = Arc::new(DefaultClock);
        Self {
            catalog: ReviewCatalog::new(Arc::clone(&store), Arc::clone(&clock)),
            ledger: TaskLedger::new(Arc::clone(&store), Arc::clone(&clock)),
            profiles: ProfileDirectory::new(store, Arc::clone(&clock)),
            media: MediaLibrary::new(objects, signer, clock),
            identity,
            limits,
        }
    }

    /// Opens the configured adapters and wires the services.
    ///
    /// Uses `PostgreSQL` when `DATABASE_URL` is set and the filesystem when
    /// `MEDIA_ROOT` is set; otherwise falls back to in-memory adapters.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError`] when an adapter cannot be opened.
    pub async fn from_config(config: &AppConfig) -> Result<Self, BootstrapError> {
        let store: Arc<SharedStore> = match &config.database_url {
            Some(url) => {
                let postgres = PostgresKeyValueStore::connect(url, config.database_pool_size)?;
                postgres.ensure_schema().await?;
                tracing::info!("using PostgreSQL key-value store");
                Arc::new(postgres)
            }
            None => {
                tracing::warn!("DATABASE_URL unset; state will not survive a restart");
                Arc::new(InMemoryKeyValueStore::new())
            }
        };

        let objects: Arc<SharedObjects> = match &config.media_root {
            Some(root) => {
                tracing::info!(root = %root, "using filesystem object store");
                Arc::new(FilesystemObjectStore::open(root)?)
            }
            None => {
                tracing::warn!("MEDIA_ROOT unset; uploads will not survive a restart");
                Arc::new(InMemoryObjectStore::new())
            }
        };

        let identity = Arc::new(LocalIdentityProvider::new(
            TokenSettings::new(config.jwt_secret.clone(), config.jwt_expiry),
            Arc::new(DefaultClock),
        ));
        let signer = UrlSigner::new(
            config.media_signing_secret.as_bytes(),
            config.public_base_url.clone(),
            config.media_url_ttl,
        )?;

        Ok(Self::new(store, objects, identity, signer, config.limits))
    }

    /// Repairs interrupted claims and, when enabled, seeds sample postings.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError`] when reconciliation or seeding fails.
    pub async fn prepare(&self, seed_samples: bool) -> Result<(), BootstrapError> {
        let report = self.ledger.reconcile().await?;
        if report.is_clean() {
            tracing::info!(claims = report.claims_examined, "claim ledger consistent");
        } else {
            tracing::warn!(?report, "repaired interrupted claims");
        }

        if seed_samples && self.catalog.seed_samples().await? == SeedOutcome::AlreadySeeded {
            tracing::debug!("catalog already populated; skipped seeding");
        }
        Ok(())
    }
}
