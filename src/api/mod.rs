//! HTTP API module for the payroll ledger.
//!
//! This module exposes the ledger's queries and mutations as REST
//! endpoints. The ledger is shared between handlers behind a single lock.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BonusRequest, EmployeeQuery, ExportRequest, HoursRequest, LeaveRequest, RaiseRequest,
    ReviewRequest, TopEarnersQuery,
};
pub use response::{
    ApiError, ApiErrorResponse, DepartmentStatsResponse, EarnerEntry, ExperienceEntry,
    ExportResponse, MutationResponse, PayslipResponse, ReviewAdded, TotalPayrollResponse,
};
pub use state::AppState;
