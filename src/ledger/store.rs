//! The in-memory employee collection and its ID-keyed operations.

use std::path::Path;

use rust_decimal::Decimal;
use tracing::warn;

use crate::codec::{self, LoadReport};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Employee, Payslip, PerformanceRecord};

/// Outcome of a leave application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct LeaveDecision {
    /// Whether the leave was approved.
    pub approved: bool,
    /// Remaining balance after the decision.
    pub leave_balance: u32,
    /// Total days taken after the decision.
    pub leaves_taken: u32,
}

/// Review history together with its average rating.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PerformanceSummary {
    /// The employee's ID.
    pub employee_id: String,
    /// Reviews in the order they were added.
    pub reviews: Vec<PerformanceRecord>,
    /// Mean rating, `0.0` without reviews.
    pub average_rating: f64,
}

/// All employees loaded in this session, in load order.
///
/// IDs are not required to be unique. Every ID-keyed operation acts on the
/// first employee with that ID.
///
/// # Examples
///
/// ```
/// use payroll_ledger::codec::{parse_document, SAMPLE_DATA};
/// use payroll_ledger::ledger::PayrollLedger;
/// use rust_decimal::Decimal;
///
/// let ledger = PayrollLedger::from_employees(parse_document(SAMPLE_DATA).employees);
/// assert_eq!(ledger.len(), 5);
/// assert_eq!(ledger.total_payroll(), Decimal::from(35700));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PayrollLedger {
    pub(super) employees: Vec<Employee>,
}

impl PayrollLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger holding `employees` in the given order.
    pub fn from_employees(employees: Vec<Employee>) -> Self {
        Self { employees }
    }

    /// Loads employees from a data file, appending them to the ledger.
    ///
    /// A missing file is replaced by the sample file before parsing.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> LedgerResult<LoadReport> {
        let parsed = codec::load_employees(path)?;
        self.employees.extend(parsed.employees);
        Ok(parsed.report)
    }

    /// Writes the plain-text report for every employee.
    pub fn export<P: AsRef<Path>>(&self, path: P, company_name: &str) -> LedgerResult<usize> {
        codec::export_report(path, company_name, &self.employees)
    }

    /// Adds one employee at the end of the ledger.
    pub fn push(&mut self, employee: Employee) {
        self.employees.push(employee);
    }

    /// All employees in ledger order.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Number of employees.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Whether the ledger is empty.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// The first employee with the given ID.
    pub fn find_by_id(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|employee| employee.id() == id)
    }

    /// Like [`find_by_id`](Self::find_by_id), but reports a miss as [`LedgerError::NotFound`].
    pub fn get(&self, id: &str) -> LedgerResult<&Employee> {
        self.find_by_id(id).ok_or_else(|| LedgerError::NotFound {
            id: id.to_string(),
        })
    }

    fn get_mut(&mut self, id: &str) -> LedgerResult<&mut Employee> {
        self.employees
            .iter_mut()
            .find(|employee| employee.id() == id)
            .ok_or_else(|| LedgerError::NotFound {
                id: id.to_string(),
            })
    }

    /// Payslip for one employee.
    pub fn payslip(&self, id: &str) -> LedgerResult<Payslip> {
        self.get(id).map(Employee::payslip)
    }

    /// Payslips for every employee, in ledger order.
    pub fn payslips(&self) -> Vec<Payslip> {
        self.employees.iter().map(Employee::payslip).collect()
    }

    /// Applies for leave. A rejection is reported in the decision, not as an error.
    pub fn apply_leave(&mut self, id: &str, days: u32) -> LedgerResult<LeaveDecision> {
        let employee = self.get_mut(id)?;
        let approved = employee.apply_leave(days);
        let leave = employee.leave();
        if !approved {
            warn!(
                employee_id = %id,
                days,
                leave_balance = leave.balance(),
                "Insufficient leave balance"
            );
        }
        Ok(LeaveDecision {
            approved,
            leave_balance: leave.balance(),
            leaves_taken: leave.taken(),
        })
    }

    /// Adds a performance review, returning the new history length.
    pub fn add_review(
        &mut self,
        id: &str,
        rating: i32,
        review: &str,
        date: &str,
        reviewed_by: &str,
    ) -> LedgerResult<usize> {
        let employee = self.get_mut(id)?;
        employee
            .add_performance_review(rating, review, date, reviewed_by)
            .inspect_err(|err| warn!(employee_id = %id, error = %err, "Review rejected"))?;
        Ok(employee.performance_history().len())
    }

    /// Review history and average rating.
    pub fn performance(&self, id: &str) -> LedgerResult<PerformanceSummary> {
        let employee = self.get(id)?;
        Ok(PerformanceSummary {
            employee_id: employee.id().to_string(),
            reviews: employee.performance_history().to_vec(),
            average_rating: employee.average_rating(),
        })
    }

    /// Gives a percentage raise, returning the new monthly salary.
    pub fn give_raise(&mut self, id: &str, percentage: Decimal) -> LedgerResult<Decimal> {
        self.get_mut(id)?.give_raise(percentage)
    }

    /// Replaces a manager's bonus, returning the new bonus.
    pub fn set_bonus(&mut self, id: &str, amount: Decimal) -> LedgerResult<Decimal> {
        self.get_mut(id)?.set_bonus(amount)
    }

    /// Records a completed project, returning the developer's project count.
    pub fn complete_project(&mut self, id: &str) -> LedgerResult<u32> {
        self.get_mut(id)?.complete_project()
    }

    /// Logs hours, returning the new total.
    pub fn log_hours(&mut self, id: &str, hours: i32) -> LedgerResult<i32> {
        self.get_mut(id)?.log_hours(hours)
    }

    /// Completes a contract, returning the new gross pay.
    pub fn complete_contract(&mut self, id: &str) -> LedgerResult<Decimal> {
        self.get_mut(id)?.complete_contract()
    }
}
