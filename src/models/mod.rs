//! Core data models for the payroll ledger.
//!
//! This module contains the employee record, its category payloads and the
//! value types attached to it.

mod category;
mod employee;
mod payslip;
mod performance;

pub use category::{
    ContractTerms, DeveloperTerms, EmployeeCategory, HourlyTerms, InternTerms, ManagerTerms,
    STANDARD_MONTHLY_HOURS, SalaryTerms, incomplete_contract_share, intern_hourly_rate,
    is_valid_money_amount, max_money_amount, project_bonus, team_bonus_per_member,
};
pub use employee::{Employee, EmployeeProfile, INITIAL_LEAVE_BALANCE, LeaveLedger, tax_rate};
pub use payslip::Payslip;
pub use performance::{MAX_RATING, MIN_RATING, PerformanceRecord, Rating};
