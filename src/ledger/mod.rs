//! The payroll ledger: storage, lookups and reports over all employees.
//!
//! The ledger is a plain single-owner value with no interior locking.
//! Callers that share it across tasks wrap the whole ledger in one lock
//! (see [`crate::api::AppState`]).

mod query;
mod store;

pub use query::{DEFAULT_TOP_EARNERS, DepartmentStats};
pub use store::{LeaveDecision, PayrollLedger, PerformanceSummary};
