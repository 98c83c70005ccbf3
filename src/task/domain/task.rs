//! Task aggregate root.

use super::{ReviewSnapshot, Submission, TaskDomainError, TaskId, TaskStatus};
use crate::catalog::domain::{Review, ReviewId};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// One worker's claim on one review, as stored under `task:<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    review_id: ReviewId,
    worker_id: UserId,
    status: TaskStatus,
    accepted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    submitted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    review_text: Option<String>,
    #[serde(default)]
    image_urls: Vec<String>,
    #[serde(default)]
    screenshot_urls: Vec<String>,
    review: ReviewSnapshot,
}

impl Task {
    /// Creates a `writing` task for `worker_id` on `review`.
    #[must_use]
    pub fn claim(review: &Review, worker_id: UserId, clock: &impl Clock) -> Self {
        Self {
            id: TaskId::generate(clock),
            review_id: review.id().clone(),
            worker_id,
            status: TaskStatus::Writing,
            accepted_at: clock.utc(),
            submitted_at: None,
            review_text: None,
            image_urls: Vec::new(),
            screenshot_urls: Vec::new(),
            review: ReviewSnapshot::from(review),
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the claimed review.
    #[must_use]
    pub const fn review_id(&self) -> &ReviewId {
        &self.review_id
    }

    /// Returns the owning worker.
    #[must_use]
    pub const fn worker_id(&self) -> &UserId {
        &self.worker_id
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns when the review was claimed.
    #[must_use]
    pub const fn accepted_at(&self) -> DateTime<Utc> {
        self.accepted_at
    }

    /// Returns when the task was submitted, if it has been.
    #[must_use]
    pub const fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    /// Returns the submitted review text.
    #[must_use]
    pub fn review_text(&self) -> Option<&str> {
        self.review_text.as_deref()
    }

    /// Returns the submitted image links.
    #[must_use]
    pub fn image_urls(&self) -> &[String] {
        &self.image_urls
    }

    /// Returns the submitted screenshot links.
    #[must_use]
    pub fn screenshot_urls(&self) -> &[String] {
        &self.screenshot_urls
    }

    /// Returns the review snapshot taken at claim time.
    #[must_use]
    pub const fn review(&self) -> &ReviewSnapshot {
        &self.review
    }

    /// Returns whether `worker_id` owns this task.
    #[must_use]
    pub fn is_owned_by(&self, worker_id: &UserId) -> bool {
        &self.worker_id == worker_id
    }

    /// Records a submission and moves the task to `submitted`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] unless the task
    /// is `writing`. The task is left untouched on error.
    pub fn submit(
        &mut self,
        submission: Submission,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_transition(TaskStatus::Submitted)?;
        let (review_text, image_urls, screenshot_urls) = submission.into_parts();
        self.status = TaskStatus::Submitted;
        self.submitted_at = Some(clock.utc());
        self.review_text = Some(review_text);
        self.image_urls = image_urls;
        self.screenshot_urls = screenshot_urls;
        Ok(())
    }

    /// Advances the task one step past `submitted`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::SubmissionRequired`] when `target` is
    /// `submitted`, or [`TaskDomainError::InvalidStateTransition`] when
    /// `target` is not the next status.
    pub fn advance_to(&mut self, target: TaskStatus) -> Result<(), TaskDomainError> {
        if target == TaskStatus::Submitted {
            return Err(TaskDomainError::SubmissionRequired(self.id.clone()));
        }
        self.ensure_transition(target)?;
        self.status = target;
        Ok(())
    }

    fn ensure_transition(&self, target: TaskStatus) -> Result<(), TaskDomainError> {
        if self.status.can_transition_to(target) {
            return Ok(());
        }
        Err(TaskDomainError::InvalidStateTransition {
            task_id: self.id.clone(),
            from: self.status,
            to: target,
        })
    }
}
