//! Shared fixtures for task unit tests.

use std::sync::Arc;

use crate::catalog::{
    domain::{NewReview, Review, ReviewCategory, ReviewId, Reward},
    services::ReviewCatalog,
};
use crate::identity::domain::UserId;
use crate::storage::adapters::memory::InMemoryKeyValueStore;
use crate::task::{domain::Submission, services::TaskLedger};
use chrono::{Duration, Utc};
use mockable::DefaultClock;
use rstest::fixture;

pub(super) type TestLedger = TaskLedger<InMemoryKeyValueStore, DefaultClock>;

pub(super) struct Harness {
    pub store: Arc<InMemoryKeyValueStore>,
    pub catalog: ReviewCatalog<InMemoryKeyValueStore, DefaultClock>,
    pub ledger: TestLedger,
}

#[fixture]
pub(super) fn harness() -> Harness {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let clock = Arc::new(DefaultClock);
    Harness {
        catalog: ReviewCatalog::new(Arc::clone(&store), Arc::clone(&clock)),
        ledger: TaskLedger::new(Arc::clone(&store), clock),
        store,
    }
}

pub(super) fn review_id(raw: &str) -> ReviewId {
    ReviewId::new(raw).expect("valid review id")
}

pub(super) fn worker(raw: &str) -> UserId {
    UserId::new(raw).expect("valid user id")
}

pub(super) fn new_review(id: &str, reward: u64) -> NewReview {
    let now = Utc::now();
    NewReview {
        id: review_id(id),
        business_name: "Cafe Gangnam".to_owned(),
        region: "Seoul Gangnam-gu".to_owned(),
        content: "Write a visit review".to_owned(),
        full_description: "Visit the cafe and describe the coffee.".to_owned(),
        image_url: None,
        category: ReviewCategory::General,
        duration: "1-2h".to_owned(),
        reward: Reward::new(reward).expect("positive reward"),
        registered_date: now,
        deadline: now + Duration::days(7),
        requirements: vec!["Order one drink".to_owned()],
        restrictions: Vec::new(),
        verification_method: "Receipt".to_owned(),
    }
}

pub(super) fn review(id: &str, reward: u64) -> Review {
    Review::new(new_review(id, reward)).expect("valid review")
}

pub(super) async fn publish(harness: &Harness, id: &str, reward: u64) {
    harness
        .catalog
        .publish(new_review(id, reward))
        .await
        .expect("publish succeeds");
}

pub(super) fn submission(text: &str) -> Submission {
    Submission::new(text, vec!["https://cdn.test/images/a.png".to_owned()])
        .with_screenshot_urls(vec!["https://cdn.test/screenshots/b.png".to_owned()])
}
