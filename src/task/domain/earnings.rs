//! Read-only earnings aggregates for a worker.

use super::{Task, TaskStatus};
use serde::{Deserialize, Serialize};

/// Totals derived from a worker's tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsSummary {
    /// Number of tasks ever claimed.
    pub total_tasks: u64,
    /// Tasks still `writing` or `submitted`.
    pub active_tasks: u64,
    /// Tasks `approved`.
    pub completed_tasks: u64,
    /// Approved share of all tasks, as a rounded percentage.
    pub approval_rate: u64,
    /// Sum of rewards of approved tasks.
    pub available_earnings: u64,
    /// Sum of rewards of tasks awaiting approval.
    pub pending_earnings: u64,
}

impl EarningsSummary {
    /// Aggregates `tasks`.
    #[must_use]
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut summary = Self::default();
        for task in tasks {
            let reward = task.review().reward.value();
            summary.total_tasks = summary.total_tasks.saturating_add(1);
            if task.status().is_active() {
                summary.active_tasks = summary.active_tasks.saturating_add(1);
            }
            if task.status() == TaskStatus::Approved {
                summary.completed_tasks = summary.completed_tasks.saturating_add(1);
                summary.available_earnings = summary.available_earnings.saturating_add(reward);
            }
            if task.status().is_pending_payout() {
                summary.pending_earnings = summary.pending_earnings.saturating_add(reward);
            }
        }
        summary.approval_rate = rounded_percentage(summary.completed_tasks, summary.total_tasks);
        summary
    }
}

/// Returns `part / whole * 100` rounded half up, or zero for an empty whole.
fn rounded_percentage(part: u64, whole: u64) -> u64 {
    let numerator = part.saturating_mul(200).saturating_add(whole);
    numerator
        .checked_div(whole.saturating_mul(2))
        .unwrap_or_default()
}
