//! HTTP request handlers for the payroll ledger API.
//!
//! This module contains the handler functions for all API endpoints. Each
//! handler locks the ledger for a single operation. The one file write,
//! `POST /export`, runs on the blocking pool, never on an async worker.

use axum::{
    Json, Router,
    body::Body,
    extract::{FromRequest, Path, Query, Request, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::LedgerError;
use crate::ledger::{LeaveDecision, PayrollLedger, PerformanceSummary};
use crate::models::{Employee, Payslip};

use super::request::{
    BonusRequest, EmployeeQuery, ExportRequest, HoursRequest, LeaveRequest, RaiseRequest,
    ReviewRequest, TopEarnersQuery,
};
use super::response::{
    ApiError, ApiErrorResponse, ApiResult, DepartmentStatsResponse, EarnerEntry, ExperienceEntry,
    ExportResponse, MutationResponse, PayslipResponse, ReviewAdded, TotalPayrollResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees", get(list_employees))
        .route("/employees/by-experience", get(employees_by_experience))
        .route("/employees/:id", get(get_employee))
        .route("/employees/:id/payslip", get(get_payslip))
        .route("/employees/:id/reviews", get(get_reviews).post(add_review))
        .route("/employees/:id/leave", post(apply_leave))
        .route("/employees/:id/raise", post(give_raise))
        .route("/employees/:id/bonus", post(set_bonus))
        .route("/employees/:id/projects", post(complete_project))
        .route("/employees/:id/hours", post(log_hours))
        .route("/employees/:id/contract/complete", post(complete_contract))
        .route("/payroll/total", get(total_payroll))
        .route("/payroll/departments", get(department_stats))
        .route("/payroll/top-earners", get(top_earners))
        .route("/payroll/payslips", get(all_payslips))
        .route("/export", post(export_report))
        .with_state(state)
}

/// Largest accepted body for `POST /export`.
const MAX_EXPORT_BODY: usize = 64 * 1024;

/// Unwraps a JSON body, turning extractor rejections into API errors.
fn parse_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        warn!(
            correlation_id = %correlation_id,
            error = %rejection.body_text(),
            "Rejected request body"
        );
        let error = match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
            }
            other => ApiError::malformed_json(other.body_text()),
        };
        ApiErrorResponse {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    })
}

/// Logs a failed ledger operation and converts it for the response.
fn reject(correlation_id: Uuid, err: LedgerError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %err, "Ledger operation failed");
    err.into()
}

fn mutation_response(
    ledger: &PayrollLedger,
    id: &str,
    value: serde_json::Value,
) -> ApiResult<MutationResponse> {
    let employee = ledger.get(id)?;
    Ok(Json(MutationResponse {
        employee_id: employee.id().to_string(),
        value,
        gross_pay: employee.gross_pay(),
    }))
}

/// Handler for GET /employees, optionally filtered by name or department.
async fn list_employees(
    State(state): State<AppState>,
    Query(query): Query<EmployeeQuery>,
) -> ApiResult<Vec<Employee>> {
    let ledger = state.ledger();
    let matches: Vec<&Employee> = match (query.name.as_deref(), query.department.as_deref()) {
        (Some(name), Some(department)) => ledger
            .find_by_name_substring(name)
            .into_iter()
            .filter(|employee| employee.department() == department)
            .collect(),
        (Some(name), None) => ledger.find_by_name_substring(name),
        (None, Some(department)) => ledger.filter_by_department(department),
        (None, None) => ledger.employees().iter().collect(),
    };
    Ok(Json(matches.into_iter().cloned().collect()))
}

/// Handler for GET /employees/by-experience.
async fn employees_by_experience(State(state): State<AppState>) -> ApiResult<Vec<ExperienceEntry>> {
    let ledger = state.ledger();
    let entries = ledger
        .by_experience_descending()
        .into_iter()
        .map(|employee| ExperienceEntry {
            employee_id: employee.id().to_string(),
            name: employee.name().to_string(),
            experience_years: employee.experience_years(),
        })
        .collect();
    Ok(Json(entries))
}

/// Handler for GET /employees/:id.
async fn get_employee(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Employee> {
    let ledger = state.ledger();
    Ok(Json(ledger.get(&id)?.clone()))
}

/// Handler for GET /employees/:id/payslip.
async fn get_payslip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<PayslipResponse> {
    let payslip = state.ledger().payslip(&id)?;
    Ok(Json(PayslipResponse {
        payslip,
        issued_at: Utc::now(),
    }))
}

/// Handler for GET /employees/:id/reviews.
async fn get_reviews(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<PerformanceSummary> {
    Ok(Json(state.ledger().performance(&id)?))
}

/// Handler for POST /employees/:id/reviews.
async fn add_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> ApiResult<ReviewAdded> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(correlation_id, payload)?;
    info!(correlation_id = %correlation_id, employee_id = %id, rating = request.rating, "Adding review");

    let review_count = state
        .ledger()
        .add_review(
            &id,
            request.rating,
            &request.review,
            &request.date,
            &request.reviewed_by,
        )
        .map_err(|err| reject(correlation_id, err))?;
    Ok(Json(ReviewAdded {
        employee_id: id,
        review_count,
    }))
}

/// Handler for POST /employees/:id/leave.
///
/// An insufficient balance is a normal response with `approved: false`.
async fn apply_leave(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<LeaveRequest>, JsonRejection>,
) -> ApiResult<LeaveDecision> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(correlation_id, payload)?;
    info!(correlation_id = %correlation_id, employee_id = %id, days = request.days, "Processing leave application");

    let decision = state
        .ledger()
        .apply_leave(&id, request.days)
        .map_err(|err| reject(correlation_id, err))?;
    Ok(Json(decision))
}

/// Handler for POST /employees/:id/raise.
async fn give_raise(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RaiseRequest>, JsonRejection>,
) -> ApiResult<MutationResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(correlation_id, payload)?;
    info!(correlation_id = %correlation_id, employee_id = %id, percentage = %request.percentage, "Processing raise");

    let mut ledger = state.ledger();
    let salary = ledger
        .give_raise(&id, request.percentage)
        .map_err(|err| reject(correlation_id, err))?;
    mutation_response(&ledger, &id, json!({ "monthly_salary": salary }))
}

/// Handler for POST /employees/:id/bonus.
async fn set_bonus(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<BonusRequest>, JsonRejection>,
) -> ApiResult<MutationResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(correlation_id, payload)?;
    info!(correlation_id = %correlation_id, employee_id = %id, amount = %request.amount, "Setting bonus");

    let mut ledger = state.ledger();
    let bonus = ledger
        .set_bonus(&id, request.amount)
        .map_err(|err| reject(correlation_id, err))?;
    mutation_response(&ledger, &id, json!({ "bonus": bonus }))
}

/// Handler for POST /employees/:id/projects.
async fn complete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<MutationResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %id, "Completing project");

    let mut ledger = state.ledger();
    let projects = ledger
        .complete_project(&id)
        .map_err(|err| reject(correlation_id, err))?;
    mutation_response(&ledger, &id, json!({ "projects_completed": projects }))
}

/// Handler for POST /employees/:id/hours.
async fn log_hours(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<HoursRequest>, JsonRejection>,
) -> ApiResult<MutationResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(correlation_id, payload)?;
    info!(correlation_id = %correlation_id, employee_id = %id, hours = request.hours, "Logging hours");

    let mut ledger = state.ledger();
    let total = ledger
        .log_hours(&id, request.hours)
        .map_err(|err| reject(correlation_id, err))?;
    mutation_response(&ledger, &id, json!({ "hours_worked": total }))
}

/// Handler for POST /employees/:id/contract/complete.
async fn complete_contract(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<MutationResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %id, "Completing contract");

    let mut ledger = state.ledger();
    ledger
        .complete_contract(&id)
        .map_err(|err| reject(correlation_id, err))?;
    mutation_response(&ledger, &id, json!({ "is_completed": true }))
}

/// Handler for GET /payroll/total.
async fn total_payroll(State(state): State<AppState>) -> ApiResult<TotalPayrollResponse> {
    let ledger = state.ledger();
    Ok(Json(TotalPayrollResponse {
        employees: ledger.len(),
        total_gross_pay: ledger.total_payroll(),
    }))
}

/// Handler for GET /payroll/departments.
async fn department_stats(State(state): State<AppState>) -> ApiResult<DepartmentStatsResponse> {
    Ok(Json(DepartmentStatsResponse {
        departments: state.ledger().department_stats(),
    }))
}

/// Handler for GET /payroll/top-earners.
async fn top_earners(
    State(state): State<AppState>,
    Query(query): Query<TopEarnersQuery>,
) -> ApiResult<Vec<EarnerEntry>> {
    let n = query.n.unwrap_or(state.config().top_earners_limit);
    let ledger = state.ledger();
    let entries = ledger
        .top_earners(n)
        .into_iter()
        .enumerate()
        .map(|(index, employee)| EarnerEntry::new(index + 1, employee))
        .collect();
    Ok(Json(entries))
}

/// Handler for GET /payroll/payslips.
async fn all_payslips(State(state): State<AppState>) -> ApiResult<Vec<Payslip>> {
    Ok(Json(state.ledger().payslips()))
}

/// Handler for POST /export.
///
/// A request without a body exports to the configured file. A body that is
/// present must be a valid [`ExportRequest`]. The report is written on the
/// blocking pool while the ledger lock is held.
async fn export_report(
    State(state): State<AppState>,
    request: Request,
) -> ApiResult<ExportResponse> {
    let correlation_id = Uuid::new_v4();
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, MAX_EXPORT_BODY)
        .await
        .map_err(|err| ApiErrorResponse {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::malformed_json(err.to_string()),
        })?;

    let export = if bytes.is_empty() {
        ExportRequest::default()
    } else {
        let request = Request::from_parts(parts, Body::from(bytes));
        parse_body(
            correlation_id,
            Json::<ExportRequest>::from_request(request, &state).await,
        )?
    };
    let path = export
        .path
        .unwrap_or_else(|| state.config().export_file.clone());
    let display_path = path.display().to_string();
    info!(correlation_id = %correlation_id, path = %display_path, "Exporting report");

    let export_state = state.clone();
    let employees = tokio::task::spawn_blocking(move || {
        export_state
            .ledger()
            .export(&path, &export_state.config().company_name)
    })
    .await
    .map_err(|err| LedgerError::WriteFailed {
        path: display_path.clone(),
        message: err.to_string(),
    })
    .and_then(|written| written)
    .map_err(|err| reject(correlation_id, err))?;

    Ok(Json(ExportResponse {
        path: display_path,
        employees,
    }))
}
