//! Search, aggregation and ranking over the ledger.
//!
//! Rankings use a stable sort, so employees with equal keys keep their
//! ledger (load) order.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Employee;

use super::store::PayrollLedger;

/// Default number of employees returned by [`PayrollLedger::top_earners`] callers.
pub const DEFAULT_TOP_EARNERS: usize = 10;

/// Head count and gross payroll for one department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DepartmentStats {
    /// Number of employees in the department.
    pub count: usize,
    /// Sum of gross pay over the department.
    pub total_gross_pay: Decimal,
}

impl PayrollLedger {
    /// Employees whose name contains `text` (case-sensitive), in ledger order.
    pub fn find_by_name_substring(&self, text: &str) -> Vec<&Employee> {
        self.employees
            .iter()
            .filter(|employee| employee.name().contains(text))
            .collect()
    }

    /// Employees whose department equals `department` exactly, in ledger order.
    pub fn filter_by_department(&self, department: &str) -> Vec<&Employee> {
        self.employees
            .iter()
            .filter(|employee| employee.department() == department)
            .collect()
    }

    /// Sum of gross pay over all employees.
    pub fn total_payroll(&self) -> Decimal {
        self.employees.iter().map(Employee::gross_pay).sum()
    }

    /// Per-department statistics keyed by the raw department string, sorted by name.
    pub fn department_stats(&self) -> BTreeMap<String, DepartmentStats> {
        let mut stats: BTreeMap<String, DepartmentStats> = BTreeMap::new();
        for employee in &self.employees {
            let entry = stats.entry(employee.department().to_string()).or_default();
            entry.count += 1;
            entry.total_gross_pay += employee.gross_pay();
        }
        stats
    }

    /// At most `n` employees ordered by gross pay, highest first.
    pub fn top_earners(&self, n: usize) -> Vec<&Employee> {
        let mut ranked: Vec<(&Employee, Decimal)> = self
            .employees
            .iter()
            .map(|employee| (employee, employee.gross_pay()))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.into_iter().take(n).map(|(employee, _)| employee).collect()
    }

    /// All employees ordered by years of experience, most first.
    pub fn by_experience_descending(&self) -> Vec<&Employee> {
        let mut ranked: Vec<&Employee> = self.employees.iter().collect();
        ranked.sort_by_key(|employee| std::cmp::Reverse(employee.experience_years()));
        ranked
    }
}
