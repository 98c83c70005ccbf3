//! Identifier types for the task domain.

use super::TaskDomainError;
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a task record.
///
/// Generated identifiers have the form `task-<epochMillis>-<random>`. The
/// time prefix only aids debugging; uniqueness comes from the 122 random
/// bits of the suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(String);

impl TaskId {
    const MAX_LENGTH: usize = 128;

    /// Generates a fresh identifier stamped with the clock's current time.
    #[must_use]
    pub fn generate(clock: &impl Clock) -> Self {
        Self(format!(
            "task-{}-{}",
            clock.utc().timestamp_millis(),
            Uuid::new_v4().simple()
        ))
    }

    /// Creates a validated identifier from an existing value.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTaskId`] when the value is empty,
    /// longer than 128 characters, or contains a character other than ASCII
    /// alphanumerics, `-`, `_` and `.`.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let is_valid = !raw.is_empty()
            && raw.len() <= Self::MAX_LENGTH
            && raw
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'));
        if !is_valid {
            return Err(TaskDomainError::InvalidTaskId(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskId {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskId> for String {
    fn from(value: TaskId) -> Self {
        value.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
