//! Payslip model.

use rust_decimal::Decimal;
use serde::Serialize;

/// Gross, tax and net pay for one employee at the moment it was built.
///
/// # Example
///
/// ```
/// use payroll_ledger::models::Payslip;
/// use rust_decimal::Decimal;
///
/// let payslip = Payslip {
///     employee_id: "P001".to_string(),
///     name: "David Brown".to_string(),
///     category: "Part-Time Employee".to_string(),
///     department: "Support".to_string(),
///     base_salary: Decimal::from(4000),
///     gross: Decimal::from(2000),
///     tax: Decimal::from(200),
///     net: Decimal::from(1800),
/// };
/// assert_eq!(payslip.gross - payslip.tax, payslip.net);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payslip {
    /// The employee's ID.
    pub employee_id: String,
    /// The employee's name.
    pub name: String,
    /// Display name of the employee's category.
    pub category: String,
    /// The employee's department.
    pub department: String,
    /// Nominal monthly base: salary, hourly rate over a standard month, or
    /// contract amount.
    pub base_salary: Decimal,
    /// Pay before tax.
    pub gross: Decimal,
    /// Flat tax on the gross pay.
    pub tax: Decimal,
    /// Gross minus tax.
    pub net: Decimal,
}
