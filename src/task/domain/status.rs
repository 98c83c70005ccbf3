//! Task status state machine.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a task.
///
/// Statuses only ever advance one step at a time:
/// `writing -> submitted -> pending_approval -> approved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// The worker is preparing the review.
    Writing,
    /// The worker has handed in text and images.
    Submitted,
    /// Back office is checking the submission.
    PendingApproval,
    /// Accepted; the reward is payable.
    Approved,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Writing => "writing",
            Self::Submitted => "submitted",
            Self::PendingApproval => "pending_approval",
            Self::Approved => "approved",
        }
    }

    /// Returns the status that follows this one, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Writing => Some(Self::Submitted),
            Self::Submitted => Some(Self::PendingApproval),
            Self::PendingApproval => Some(Self::Approved),
            Self::Approved => None,
        }
    }

    /// Returns whether moving to `target` is a legal single step.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }

    /// Returns whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Returns whether the worker still has the task in hand.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Writing | Self::Submitted)
    }

    /// Returns whether the reward is awaiting approval.
    #[must_use]
    pub const fn is_pending_payout(self) -> bool {
        matches!(self, Self::Submitted | Self::PendingApproval)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "writing" => Ok(Self::Writing),
            "submitted" => Ok(Self::Submitted),
            "pending_approval" => Ok(Self::PendingApproval),
            "approved" => Ok(Self::Approved),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
