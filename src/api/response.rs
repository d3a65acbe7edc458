//! Response types for the payroll ledger API.
//!
//! This module defines the success bodies that are not plain model types,
//! the error response structure, and the mapping from [`LedgerError`] to
//! HTTP status codes.

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::ledger::DepartmentStats;
use crate::models::{Employee, Payslip};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error, carrying the parser's complaint as details.
    pub fn malformed_json(details: impl Into<String>) -> Self {
        Self::with_details(
            "MALFORMED_JSON",
            "Request body is not valid JSON for this endpoint",
            details,
        )
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<LedgerError> for ApiErrorResponse {
    fn from(error: LedgerError) -> Self {
        let message = error.to_string();
        let (status, code) = match &error {
            LedgerError::ConfigNotFound { .. } | LedgerError::ConfigParseError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
            LedgerError::FileNotFound { .. } | LedgerError::ReadFailed { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "DATA_FILE_ERROR")
            }
            LedgerError::WriteFailed { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "WRITE_FAILED"),
            LedgerError::MalformedRecord { .. } => (StatusCode::BAD_REQUEST, "MALFORMED_RECORD"),
            LedgerError::NotFound { .. } => (StatusCode::NOT_FOUND, "EMPLOYEE_NOT_FOUND"),
            LedgerError::InvalidInput { .. } => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            LedgerError::UnsupportedOperation { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "UNSUPPORTED_OPERATION")
            }
        };
        ApiErrorResponse {
            status,
            error: ApiError::new(code, message),
        }
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<Json<T>, ApiErrorResponse>;

/// Body of `GET /employees/:id/payslip`.
#[derive(Debug, Clone, Serialize)]
pub struct PayslipResponse {
    /// The payslip values.
    #[serde(flatten)]
    pub payslip: Payslip,
    /// When the payslip was computed.
    pub issued_at: DateTime<Utc>,
}

/// Body of `GET /payroll/total`.
#[derive(Debug, Clone, Serialize)]
pub struct TotalPayrollResponse {
    /// Number of employees included.
    pub employees: usize,
    /// Sum of gross pay.
    pub total_gross_pay: Decimal,
}

/// Body of `GET /payroll/departments`.
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentStatsResponse {
    /// Statistics keyed by department name, in name order.
    pub departments: BTreeMap<String, DepartmentStats>,
}

/// One entry of `GET /payroll/top-earners`.
#[derive(Debug, Clone, Serialize)]
pub struct EarnerEntry {
    /// 1-based position in the ranking.
    pub rank: usize,
    /// The employee's ID.
    pub employee_id: String,
    /// The employee's name.
    pub name: String,
    /// Gross pay.
    pub gross_pay: Decimal,
}

impl EarnerEntry {
    /// Builds an entry for `employee` at 1-based `rank`.
    pub fn new(rank: usize, employee: &Employee) -> Self {
        Self {
            rank,
            employee_id: employee.id().to_string(),
            name: employee.name().to_string(),
            gross_pay: employee.gross_pay(),
        }
    }
}

/// One entry of `GET /employees/by-experience`.
#[derive(Debug, Clone, Serialize)]
pub struct ExperienceEntry {
    /// The employee's ID.
    pub employee_id: String,
    /// The employee's name.
    pub name: String,
    /// Years of experience.
    pub experience_years: u32,
}

/// Body of mutation endpoints: the employee's derived pay after the change.
#[derive(Debug, Clone, Serialize)]
pub struct MutationResponse {
    /// The employee's ID.
    pub employee_id: String,
    /// The operation's own result, e.g. the new salary or hour total.
    pub value: serde_json::Value,
    /// Gross pay after the change.
    pub gross_pay: Decimal,
}

/// Body of `POST /employees/:id/reviews`.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewAdded {
    /// The employee's ID.
    pub employee_id: String,
    /// Number of reviews after the addition.
    pub review_count: usize,
}

/// Body of `POST /export`.
#[derive(Debug, Clone, Serialize)]
pub struct ExportResponse {
    /// Where the report was written.
    pub path: String,
    /// Number of employees in the report.
    pub employees: usize,
}
