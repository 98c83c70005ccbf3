//! Claim rows guarding review exclusivity.

use super::Task;
use crate::catalog::domain::ReviewId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record stored under `claim:<reviewId>`.
///
/// Created with a set-if-absent write, it is both the lock that decides
/// which worker wins a review and the write-ahead copy of the task that the
/// winner goes on to persist. It is never removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRecord {
    /// Review the claim guards.
    pub review_id: ReviewId,
    /// Task as created at claim time.
    pub task: Task,
    /// When the claim was won.
    pub claimed_at: DateTime<Utc>,
}

impl ClaimRecord {
    /// Wraps a freshly created task.
    #[must_use]
    pub fn for_task(task: Task) -> Self {
        Self {
            review_id: task.review_id().clone(),
            claimed_at: task.accepted_at(),
            task,
        }
    }
}
