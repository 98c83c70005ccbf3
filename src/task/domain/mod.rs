//! Domain model for tasks, claims, and worker earnings.

mod claim;
mod earnings;
mod error;
mod ids;
mod snapshot;
mod status;
mod submission;
mod task;

pub use claim::ClaimRecord;
pub use earnings::EarningsSummary;
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use snapshot::ReviewSnapshot;
pub use status::TaskStatus;
pub use submission::Submission;
pub use task::Task;
