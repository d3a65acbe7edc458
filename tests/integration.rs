//! Integration tests for the payroll ledger API.
//!
//! This test suite drives the HTTP router against a ledger loaded from the
//! sample data file and covers:
//! - Listing, searching and filtering employees
//! - Payslips, total payroll, department statistics and rankings
//! - Leave applications and performance reviews
//! - Category-restricted mutations and their rejections
//! - Report export
//! - Error responses

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use payroll_ledger::api::{AppState, create_router};
use payroll_ledger::codec::{SAMPLE_DATA, parse_document};
use payroll_ledger::config::LedgerConfig;
use payroll_ledger::ledger::PayrollLedger;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let ledger = PayrollLedger::from_employees(parse_document(SAMPLE_DATA).employees);
    AppState::new(ledger, LedgerConfig::default())
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().expect("decimal encoded as string")).unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(router, request).await
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

fn ids(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|employee| employee["id"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Listing and search
// =============================================================================

#[tokio::test]
async fn test_list_all_employees_in_load_order() {
    let (status, body) = get(create_router_for_test(), "/employees").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["M001", "D001", "P001", "I001", "C001"]);
    assert_eq!(body[0]["category"], "manager");
    assert_eq!(body[3]["experience_years"], 0);
}

#[tokio::test]
async fn test_search_by_name_substring() {
    let (status, body) = get(create_router_for_test(), "/employees?name=Smith").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["D001"]);
}

#[tokio::test]
async fn test_filter_by_department() {
    let (status, body) = get(create_router_for_test(), "/employees?department=Engineering").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["M001", "D001", "I001"]);
}

#[tokio::test]
async fn test_name_and_department_combined() {
    let (_, body) = get(create_router_for_test(), "/employees?name=o&department=Engineering").await;

    // Alice Johnson and Bob Smith contain a lowercase "o"; Emma Davis does not.
    assert_eq!(ids(&body), vec!["M001", "D001"]);
}

#[tokio::test]
async fn test_get_employee_by_id() {
    let (status, body) = get(create_router_for_test(), "/employees/C001").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Frank Miller");
    assert_eq!(body["contract_end_date"], "2024-12-31");
    assert_eq!(body["is_completed"], true);
}

#[tokio::test]
async fn test_unknown_employee_is_404() {
    let (status, body) = get(create_router_for_test(), "/employees/X999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "EMPLOYEE_NOT_FOUND");
}

#[tokio::test]
async fn test_employees_by_experience() {
    let (status, body) = get(create_router_for_test(), "/employees/by-experience").await;

    assert_eq!(status, StatusCode::OK);
    let order: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["employee_id"].as_str().unwrap())
        .collect();
    assert_eq!(order, vec!["P001", "M001", "C001", "D001", "I001"]);
}

// =============================================================================
// Pay queries
// =============================================================================

#[tokio::test]
async fn test_payslip_net_is_gross_minus_tax() {
    let (status, body) = get(create_router_for_test(), "/employees/M001/payslip").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&body["gross"]), Decimal::from(10500));
    assert_eq!(decimal(&body["tax"]), Decimal::from(1050));
    assert_eq!(decimal(&body["net"]), Decimal::from(9450));
    assert_eq!(body["category"], "Manager");
    assert_eq!(decimal(&body["base_salary"]), Decimal::from(8000));
    assert!(body["issued_at"].is_string());
}

#[tokio::test]
async fn test_payslip_base_salary_for_hourly_staff() {
    let (status, body) = get(create_router_for_test(), "/employees/P001/payslip").await;

    assert_eq!(status, StatusCode::OK);
    // 25.0 an hour over a 160 hour standard month.
    assert_eq!(decimal(&body["base_salary"]), Decimal::from(4000));
    assert_eq!(decimal(&body["gross"]), Decimal::from(2000));
}

#[tokio::test]
async fn test_all_payslips() {
    let (status, body) = get(create_router_for_test(), "/payroll/payslips").await;

    assert_eq!(status, StatusCode::OK);
    let payslips = body.as_array().unwrap();
    assert_eq!(payslips.len(), 5);
    for payslip in payslips {
        let gross = decimal(&payslip["gross"]);
        assert_eq!(decimal(&payslip["tax"]), gross * Decimal::new(10, 2));
        assert_eq!(decimal(&payslip["net"]), gross - decimal(&payslip["tax"]));
    }
}

#[tokio::test]
async fn test_total_payroll() {
    let (status, body) = get(create_router_for_test(), "/payroll/total").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["employees"], 5);
    assert_eq!(decimal(&body["total_gross_pay"]), Decimal::from(35700));
}

#[tokio::test]
async fn test_department_stats() {
    let (status, body) = get(create_router_for_test(), "/payroll/departments").await;

    assert_eq!(status, StatusCode::OK);
    let departments = body["departments"].as_object().unwrap();
    let names: Vec<&String> = departments.keys().collect();
    assert_eq!(names, vec!["Engineering", "Marketing", "Support"]);
    assert_eq!(departments["Engineering"]["count"], 3);
    assert_eq!(
        decimal(&departments["Engineering"]["total_gross_pay"]),
        Decimal::from(18700)
    );
}

#[tokio::test]
async fn test_top_earners_respects_n() {
    let (status, body) = get(create_router_for_test(), "/payroll/top-earners?n=3").await;

    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["employee_id"], "C001");
    assert_eq!(entries[0]["rank"], 1);
    assert_eq!(entries[1]["employee_id"], "M001");
    assert_eq!(entries[2]["employee_id"], "D001");
}

#[tokio::test]
async fn test_top_earners_default_limit_returns_all_when_fewer() {
    let (_, body) = get(create_router_for_test(), "/payroll/top-earners").await;
    assert_eq!(body.as_array().unwrap().len(), 5);
}

// =============================================================================
// Leave and reviews
// =============================================================================

#[tokio::test]
async fn test_leave_approved_then_rejected() {
    let router = create_router_for_test();

    let (status, body) = post(router.clone(), "/employees/D001/leave", json!({ "days": 15 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["approved"], true);
    assert_eq!(body["leave_balance"], 5);
    assert_eq!(body["leaves_taken"], 15);

    let (status, body) = post(router, "/employees/D001/leave", json!({ "days": 6 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["approved"], false);
    assert_eq!(body["leave_balance"], 5);
    assert_eq!(body["leaves_taken"], 15);
}

#[tokio::test]
async fn test_reviews_validated_and_averaged() {
    let router = create_router_for_test();

    for rating in [5, 3, 4] {
        let (status, _) = post(
            router.clone(),
            "/employees/P001/reviews",
            json!({ "rating": rating, "review": "ok", "date": "2024-05-01", "reviewed_by": "Alice" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = post(
        router.clone(),
        "/employees/P001/reviews",
        json!({ "rating": 6, "review": "too high", "date": "2024-05-02", "reviewed_by": "Alice" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");

    let (status, body) = get(router, "/employees/P001/reviews").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reviews"].as_array().unwrap().len(), 3);
    assert_eq!(body["average_rating"], 4.0);
}

#[tokio::test]
async fn test_reviews_empty_average_is_zero() {
    let (_, body) = get(create_router_for_test(), "/employees/I001/reviews").await;
    assert_eq!(body["average_rating"], 0.0);
}

// =============================================================================
// Category-restricted mutations
// =============================================================================

#[tokio::test]
async fn test_raise_for_manager() {
    let router = create_router_for_test();

    let (status, body) = post(router, "/employees/M001/raise", json!({ "percentage": 10 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&body["value"]["monthly_salary"]), Decimal::from(8800));
    assert_eq!(decimal(&body["gross_pay"]), Decimal::from(11300));
}

#[tokio::test]
async fn test_raise_for_intern_is_unsupported_and_pay_unchanged() {
    let router = create_router_for_test();

    let (status, body) = post(router.clone(), "/employees/I001/raise", json!({ "percentage": 10 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "UNSUPPORTED_OPERATION");

    let (_, payslip) = get(router, "/employees/I001/payslip").await;
    assert_eq!(decimal(&payslip["gross"]), Decimal::from(1800));
}

#[tokio::test]
async fn test_raise_for_contract_is_unsupported() {
    let (status, _) = post(
        create_router_for_test(),
        "/employees/C001/raise",
        json!({ "percentage": 10 }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_complete_project_for_developer() {
    let router = create_router_for_test();

    let (status, body) = post(router.clone(), "/employees/D001/projects", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["value"]["projects_completed"], 3);
    assert_eq!(decimal(&body["gross_pay"]), Decimal::from(6600));

    let (status, _) = post(router, "/employees/P001/projects", json!({})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_log_hours_for_intern() {
    let router = create_router_for_test();

    let (status, body) = post(router.clone(), "/employees/I001/hours", json!({ "hours": 10 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["value"]["hours_worked"], 130);
    assert_eq!(decimal(&body["gross_pay"]), Decimal::from(1950));

    let (status, _) = post(router, "/employees/M001/hours", json!({ "hours": 10 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_set_bonus_for_manager_only() {
    let router = create_router_for_test();

    let (status, body) = post(router.clone(), "/employees/M001/bonus", json!({ "amount": "250.50" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&body["gross_pay"]), Decimal::from_str("10750.50").unwrap());

    let (status, _) = post(router, "/employees/D001/bonus", json!({ "amount": 100 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_complete_contract() {
    let ledger = PayrollLedger::from_employees(
        parse_document(
            "CONTRACT C002 30 2 |Gina Open|1 Way|Marketing|2024-02-01|2024-11-30| 9000 0\n",
        )
        .employees,
    );
    let router = create_router(AppState::new(ledger, LedgerConfig::default()));

    let (status, body) = post(router, "/employees/C002/contract/complete", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&body["gross_pay"]), Decimal::from(9000));
}

// =============================================================================
// Export and error handling
// =============================================================================

#[tokio::test]
async fn test_export_writes_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.txt");

    let (status, body) = post(
        create_router_for_test(),
        "/export",
        json!({ "path": path.display().to_string() }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["employees"], 5);
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("EMPLOYEE REPORT - TechCorp Solutions\n"));
    assert!(content.contains("ID: C001\nName: Frank Miller\nType: Contract Employee\nDepartment: Marketing\nSalary: $15000.00\n"));
}

fn create_router_exporting_to(path: &std::path::Path) -> Router {
    let ledger = PayrollLedger::from_employees(parse_document(SAMPLE_DATA).employees);
    let config = LedgerConfig {
        export_file: path.to_path_buf(),
        ..LedgerConfig::default()
    };
    create_router(AppState::new(ledger, config))
}

#[tokio::test]
async fn test_export_without_body_uses_configured_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("configured.txt");
    let request = Request::builder()
        .method("POST")
        .uri("/export")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(create_router_exporting_to(&path), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["path"], path.display().to_string());
    assert!(std::fs::read_to_string(&path).unwrap().contains("ID: M001\n"));
}

#[tokio::test]
async fn test_export_with_invalid_body_is_400_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("configured.txt");

    let (status, body) = post(
        create_router_exporting_to(&path),
        "/export",
        json!({ "path": 5 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
    assert!(!path.exists());
}

#[tokio::test]
async fn test_export_to_unwritable_path_is_500() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("report.txt");

    let (status, body) = post(
        create_router_for_test(),
        "/export",
        json!({ "path": path.display().to_string() }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "WRITE_FAILED");
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/employees/M001/leave")
        .header("Content-Type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let (status, body) = send(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_oversized_bonus_is_rejected_and_payroll_still_computes() {
    let router = create_router_for_test();

    let (status, body) = post(
        router.clone(),
        "/employees/M001/bonus",
        json!({ "amount": "79228162514264337593543950335" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");

    let (status, body) = get(router.clone(), "/payroll/total").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&body["total_gross_pay"]), Decimal::from(35700));

    let (status, _) = get(router, "/payroll/payslips").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_missing_content_type_is_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/employees/M001/leave")
        .body(Body::from(r#"{"days": 1}"#))
        .unwrap();

    let (status, body) = send(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_CONTENT_TYPE");
}

#[tokio::test]
async fn test_mutation_on_unknown_employee_is_404() {
    let (status, _) = post(
        create_router_for_test(),
        "/employees/NOPE/hours",
        json!({ "hours": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
