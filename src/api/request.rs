//! Request types for the payroll ledger API.
//!
//! This module defines the JSON bodies and query strings accepted by the
//! mutating and filtering endpoints.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Query string for `GET /employees`.
///
/// `name` is a case-sensitive substring match; `department` is an exact
/// match. When both are given, both must hold.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeQuery {
    /// Substring of the employee's name.
    #[serde(default)]
    pub name: Option<String>,
    /// Exact department name.
    #[serde(default)]
    pub department: Option<String>,
}

/// Query string for `GET /payroll/top-earners`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopEarnersQuery {
    /// Maximum number of employees; the configured limit when absent.
    #[serde(default)]
    pub n: Option<usize>,
}

/// Body of `POST /employees/:id/reviews`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// Rating from 1 to 5. Validated by the ledger, not here.
    pub rating: i32,
    /// Review text.
    pub review: String,
    /// Review date, free-form.
    pub date: String,
    /// Reviewer name.
    pub reviewed_by: String,
}

/// Body of `POST /employees/:id/leave`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Number of leave days requested.
    pub days: u32,
}

/// Body of `POST /employees/:id/raise`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaiseRequest {
    /// Raise in percent of the current monthly salary; may be negative.
    pub percentage: Decimal,
}

/// Body of `POST /employees/:id/bonus`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusRequest {
    /// The new bonus amount.
    pub amount: Decimal,
}

/// Body of `POST /employees/:id/hours`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoursRequest {
    /// Hours to add; negative values correct earlier entries.
    pub hours: i32,
}

/// Body of `POST /export`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Destination file; the configured export file when absent.
    #[serde(default)]
    pub path: Option<PathBuf>,
}
