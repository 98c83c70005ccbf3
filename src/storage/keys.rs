//! Record key namespace.
//!
//! Identifiers embedded in keys never contain `:`; the identifier types
//! enforce this at construction so a prefix scan over one worker's index can
//! never match another worker's entries.

/// Prefix shared by all review postings.
pub const REVIEW_PREFIX: &str = "review:";
/// Prefix shared by all task records.
pub const TASK_PREFIX: &str = "task:";
/// Prefix shared by all claim rows.
pub const CLAIM_PREFIX: &str = "claim:";
/// Prefix shared by the worker-to-task secondary index.
pub const WORKER_TASK_PREFIX: &str = "user_task:";
/// Prefix shared by mirrored user profiles.
pub const USER_PREFIX: &str = "user:";

/// Key of a review posting.
#[must_use]
pub fn review(review_id: &str) -> String {
    format!("{REVIEW_PREFIX}{review_id}")
}

/// Key of a task record.
#[must_use]
pub fn task(task_id: &str) -> String {
    format!("{TASK_PREFIX}{task_id}")
}

/// Key of the claim row guarding a review.
#[must_use]
pub fn claim(review_id: &str) -> String {
    format!("{CLAIM_PREFIX}{review_id}")
}

/// Key of one worker index entry.
#[must_use]
pub fn worker_task(worker_id: &str, task_id: &str) -> String {
    format!("{WORKER_TASK_PREFIX}{worker_id}:{task_id}")
}

/// Prefix covering every index entry of one worker.
#[must_use]
pub fn worker_tasks_prefix(worker_id: &str) -> String {
    format!("{WORKER_TASK_PREFIX}{worker_id}:")
}

/// Key of a mirrored user profile.
#[must_use]
pub fn user(user_id: &str) -> String {
    format!("{USER_PREFIX}{user_id}")
}
