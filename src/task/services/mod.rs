//! Task ledger orchestration services.

mod ledger;
mod reconcile;

pub use ledger::{TaskLedger, TaskLedgerError, TaskLedgerResult};
pub use reconcile::ReconciliationReport;
