//! Shared helpers for in-memory integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use mockable::DefaultClock;
use reviewhub::catalog::{
    domain::{NewReview, ReviewCategory, ReviewId, Reward},
    services::ReviewCatalog,
};
use reviewhub::identity::domain::UserId;
use reviewhub::storage::{
    adapters::memory::InMemoryKeyValueStore,
    ports::{KeyValueError, KeyValueResult, KeyValueStore},
};
use reviewhub::task::{domain::Submission, services::TaskLedger};
use rstest::fixture;
use serde_json::Value;

/// Ledger type used by the in-memory tests.
pub type TestLedger = TaskLedger<InMemoryKeyValueStore, DefaultClock>;

/// Catalog type used by the in-memory tests.
pub type TestCatalog = ReviewCatalog<InMemoryKeyValueStore, DefaultClock>;

/// Catalog and ledger sharing one store.
pub struct Marketplace {
    pub catalog: TestCatalog,
    pub ledger: TestLedger,
}

/// Provides a fresh marketplace for each test.
#[fixture]
pub fn marketplace() -> Marketplace {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let clock = Arc::new(DefaultClock);
    Marketplace {
        catalog: ReviewCatalog::new(Arc::clone(&store), Arc::clone(&clock)),
        ledger: TaskLedger::new(store, clock),
    }
}

/// Parses a review identifier.
pub fn review_id(raw: &str) -> ReviewId {
    ReviewId::new(raw).expect("valid review id")
}

/// Parses a worker identifier.
pub fn worker(raw: &str) -> UserId {
    UserId::new(raw).expect("valid user id")
}

/// Builds a general posting with the given reward.
pub fn posting(id: &str, reward: u64) -> NewReview {
    let now = Utc::now();
    NewReview {
        id: review_id(id),
        business_name: "Seongsu Bakery".to_owned(),
        region: "Seoul Seongdong-gu".to_owned(),
        content: "Bakery visit review".to_owned(),
        full_description: "Buy two pastries and review the shop.".to_owned(),
        image_url: None,
        category: ReviewCategory::General,
        duration: "1h".to_owned(),
        reward: Reward::new(reward).expect("positive reward"),
        registered_date: now,
        deadline: now + Duration::days(3),
        requirements: vec!["Photograph the storefront".to_owned()],
        restrictions: vec!["No negative reviews".to_owned()],
        verification_method: "Receipt photo".to_owned(),
    }
}

/// Builds a submission with one photo and one screenshot.
pub fn submission(text: &str) -> Submission {
    Submission::new(text, vec!["https://cdn.test/images/storefront.png".to_owned()])
        .with_screenshot_urls(vec!["https://cdn.test/screenshots/post.png".to_owned()])
}

/// Store wrapper that fails the first `set` on keys with a given prefix.
pub struct FaultyStore {
    inner: InMemoryKeyValueStore,
    failing_prefix: &'static str,
    tripped: AtomicBool,
}

impl FaultyStore {
    /// Wraps `inner`, failing the first write under `failing_prefix`.
    pub fn new(inner: InMemoryKeyValueStore, failing_prefix: &'static str) -> Self {
        Self {
            inner,
            failing_prefix,
            tripped: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl KeyValueStore for FaultyStore {
    async fn get(&self, key: &str) -> KeyValueResult<Option<Value>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Value) -> KeyValueResult<()> {
        if key.starts_with(self.failing_prefix) && !self.tripped.swap(true, Ordering::SeqCst) {
            return Err(KeyValueError::persistence(std::io::Error::other(
                "injected write failure",
            )));
        }
        self.inner.set(key, value).await
    }

    async fn get_by_prefix(&self, prefix: &str) -> KeyValueResult<Vec<Value>> {
        self.inner.get_by_prefix(prefix).await
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<Value>,
        new: Value,
    ) -> KeyValueResult<bool> {
        self.inner.compare_and_swap(key, expected, new).await
    }
}
