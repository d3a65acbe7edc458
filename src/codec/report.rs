//! Plain-text export report.
//!
//! The report is for people, not for reloading: one block per employee with
//! ID, name, category, department and the computed pay. The `Salary` line
//! carries gross pay, before tax.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Employee;

const HEADER_RULE: &str = "===========================================";
const BLOCK_RULE: &str = "-------------------------------------------";

/// Formats a money value with exactly two decimal places.
///
/// # Examples
///
/// ```
/// use payroll_ledger::codec::format_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(format_money(Decimal::from(8000)), "8000.00");
/// assert_eq!(format_money(Decimal::from_str("7500.005").unwrap()), "7500.01");
/// ```
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Renders the export report for `employees` in the given order.
pub fn render_report<'a, I>(company_name: &str, employees: I) -> String
where
    I: IntoIterator<Item = &'a Employee>,
{
    let mut report = String::new();
    let _ = writeln!(report, "EMPLOYEE REPORT - {}", company_name);
    let _ = writeln!(report, "{}", HEADER_RULE);
    report.push('\n');

    for employee in employees {
        let _ = writeln!(report, "ID: {}", employee.id());
        let _ = writeln!(report, "Name: {}", employee.name());
        let _ = writeln!(report, "Type: {}", employee.category_name());
        let _ = writeln!(report, "Department: {}", employee.department());
        let _ = writeln!(report, "Salary: ${}", format_money(employee.gross_pay()));
        let _ = writeln!(report, "{}", BLOCK_RULE);
    }

    report
}

/// Writes the export report to `path`, returning the number of employees written.
pub fn export_report<P: AsRef<Path>>(
    path: P,
    company_name: &str,
    employees: &[Employee],
) -> LedgerResult<usize> {
    let path = path.as_ref();
    let report = render_report(company_name, employees);
    fs::write(path, report).map_err(|err| LedgerError::WriteFailed {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    info!(path = %path.display(), employees = employees.len(), "Report exported");
    Ok(employees.len())
}
