//! Employee record model.
//!
//! An [`Employee`] combines the identity and employment fields shared by
//! every category with a leave ledger, a performance history and the
//! category payload that selects the pay formula. All mutations are
//! methods on the record; the ledger only locates the record.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::error::LedgerResult;

use super::category::{
    ContractTerms, DeveloperTerms, EmployeeCategory, HourlyTerms, InternTerms, ManagerTerms,
};
use super::payslip::Payslip;
use super::performance::{PerformanceRecord, Rating};

/// Leave days every employee starts with. The balance is never replenished.
pub const INITIAL_LEAVE_BALANCE: u32 = 20;

/// Flat tax rate applied to gross pay for every category.
pub fn tax_rate() -> Decimal {
    Decimal::new(10, 2)
}

/// Identity, demographic and employment fields shared by all categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeProfile {
    /// Employee ID. Not guaranteed unique within a ledger.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Postal address.
    pub address: String,
    /// Department name, compared verbatim.
    pub department: String,
    /// Join date, free-form.
    pub join_date: String,
    /// Years of prior experience.
    pub experience_years: u32,
}

/// Leave balance and leave taken.
///
/// `balance + taken` is constant: an approved application moves days from
/// the balance to the taken side, a rejected one moves nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeaveLedger {
    balance: u32,
    taken: u32,
}

impl Default for LeaveLedger {
    fn default() -> Self {
        Self {
            balance: INITIAL_LEAVE_BALANCE,
            taken: 0,
        }
    }
}

impl LeaveLedger {
    /// Remaining leave days.
    pub fn balance(&self) -> u32 {
        self.balance
    }

    /// Leave days taken so far.
    pub fn taken(&self) -> u32 {
        self.taken
    }

    fn apply(&mut self, days: u32) -> bool {
        if days > self.balance {
            return false;
        }
        self.balance -= days;
        self.taken += days;
        true
    }
}

/// An employee of any category.
///
/// # Examples
///
/// ```
/// use payroll_ledger::models::{Employee, EmployeeProfile};
/// use rust_decimal::Decimal;
///
/// let profile = EmployeeProfile {
///     id: "M001".to_string(),
///     name: "Alice Johnson".to_string(),
///     age: 35,
///     address: "123 Main St".to_string(),
///     department: "Engineering".to_string(),
///     join_date: "2020-01-15".to_string(),
///     experience_years: 10,
/// };
/// let manager = Employee::manager(profile, Decimal::from(8000), 5);
/// assert_eq!(manager.gross_pay(), Decimal::from(10500));
/// assert_eq!(manager.tax(), Decimal::from(1050));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    #[serde(flatten)]
    profile: EmployeeProfile,
    leave: LeaveLedger,
    performance_history: Vec<PerformanceRecord>,
    #[serde(flatten)]
    category: EmployeeCategory,
}

impl Employee {
    /// Creates an employee of the given category with a fresh leave ledger
    /// and no reviews.
    ///
    /// Money amounts are stored as given. Pay stays representable only for
    /// amounts that pass [`is_valid_money_amount`](super::is_valid_money_amount);
    /// the data file parser rejects anything else.
    pub fn new(profile: EmployeeProfile, category: EmployeeCategory) -> Self {
        Self {
            profile,
            leave: LeaveLedger::default(),
            performance_history: Vec::new(),
            category,
        }
    }

    /// Creates a manager; the team bonus is fixed from `team_size`.
    pub fn manager(profile: EmployeeProfile, monthly_salary: Decimal, team_size: u32) -> Self {
        Self::new(
            profile,
            EmployeeCategory::Manager(ManagerTerms::new(monthly_salary, team_size)),
        )
    }

    /// Creates a developer; the bonus starts at the per-project bonus times `projects_completed`.
    pub fn developer(
        profile: EmployeeProfile,
        monthly_salary: Decimal,
        language: impl Into<String>,
        projects_completed: u32,
    ) -> Self {
        Self::new(
            profile,
            EmployeeCategory::Developer(DeveloperTerms::new(
                monthly_salary,
                language,
                projects_completed,
            )),
        )
    }

    /// Creates a part-time employee.
    pub fn part_time(profile: EmployeeProfile, hourly_rate: Decimal, hours_worked: i32) -> Self {
        Self::new(
            profile,
            EmployeeCategory::PartTime(HourlyTerms::new(hourly_rate, hours_worked)),
        )
    }

    /// Creates an intern. Experience is forced to zero and the rate is fixed.
    pub fn intern(
        mut profile: EmployeeProfile,
        university: impl Into<String>,
        mentor: impl Into<String>,
        hours_worked: i32,
    ) -> Self {
        profile.experience_years = 0;
        Self::new(
            profile,
            EmployeeCategory::Intern(InternTerms::new(university, mentor, hours_worked)),
        )
    }

    /// Creates a contract employee.
    pub fn contract(
        profile: EmployeeProfile,
        contract_amount: Decimal,
        contract_end_date: impl Into<String>,
        is_completed: bool,
    ) -> Self {
        Self::new(
            profile,
            EmployeeCategory::Contract(ContractTerms::new(
                contract_amount,
                contract_end_date,
                is_completed,
            )),
        )
    }

    /// Shared identity and employment fields.
    pub fn profile(&self) -> &EmployeeProfile {
        &self.profile
    }

    /// Employee ID.
    pub fn id(&self) -> &str {
        &self.profile.id
    }

    /// Full name.
    pub fn name(&self) -> &str {
        &self.profile.name
    }

    /// Department name.
    pub fn department(&self) -> &str {
        &self.profile.department
    }

    /// Years of experience.
    pub fn experience_years(&self) -> u32 {
        self.profile.experience_years
    }

    /// The category payload.
    pub fn category(&self) -> &EmployeeCategory {
        &self.category
    }

    /// Display name of the category.
    pub fn category_name(&self) -> &'static str {
        self.category.name()
    }

    /// The leave ledger.
    pub fn leave(&self) -> LeaveLedger {
        self.leave
    }

    /// Reviews in the order they were added.
    pub fn performance_history(&self) -> &[PerformanceRecord] {
        &self.performance_history
    }

    /// Gross pay, recomputed from the current state.
    pub fn gross_pay(&self) -> Decimal {
        self.category.gross_pay()
    }

    /// Tax on the current gross pay.
    pub fn tax(&self) -> Decimal {
        Self::tax_on(self.gross_pay())
    }

    /// Tax owed on an arbitrary gross amount. The rate does not vary by category.
    pub fn tax_on(gross: Decimal) -> Decimal {
        gross * tax_rate()
    }

    /// Gross pay minus tax.
    pub fn net_pay(&self) -> Decimal {
        let gross = self.gross_pay();
        gross - Self::tax_on(gross)
    }

    /// Nominal monthly base for the category.
    pub fn base_salary(&self) -> Decimal {
        self.category.base_salary()
    }

    /// Builds a payslip from the current state.
    pub fn payslip(&self) -> Payslip {
        let gross = self.gross_pay();
        let tax = Self::tax_on(gross);
        Payslip {
            employee_id: self.profile.id.clone(),
            name: self.profile.name.clone(),
            category: self.category_name().to_string(),
            department: self.profile.department.clone(),
            base_salary: self.base_salary(),
            gross,
            tax,
            net: gross - tax,
        }
    }

    /// Applies for `days` of leave.
    ///
    /// Returns `true` and moves the days from balance to taken when
    /// `days <= balance`; otherwise returns `false` and changes nothing.
    pub fn apply_leave(&mut self, days: u32) -> bool {
        let approved = self.leave.apply(days);
        if approved {
            info!(
                employee_id = %self.profile.id,
                days,
                leave_balance = self.leave.balance,
                "Leave approved"
            );
        }
        approved
    }

    /// Appends a performance review after validating the rating.
    pub fn add_performance_review(
        &mut self,
        rating: i32,
        review: impl Into<String>,
        date: impl Into<String>,
        reviewed_by: impl Into<String>,
    ) -> LedgerResult<()> {
        let rating = Rating::new(rating)?;
        self.performance_history
            .push(PerformanceRecord::new(rating, review, date, reviewed_by));
        Ok(())
    }

    /// Mean rating over the whole history, or `0.0` when there are no reviews.
    pub fn average_rating(&self) -> f64 {
        if self.performance_history.is_empty() {
            return 0.0;
        }
        let sum: u32 = self
            .performance_history
            .iter()
            .map(|record| u32::from(record.rating().value()))
            .sum();
        f64::from(sum) / self.performance_history.len() as f64
    }

    /// Raises the monthly salary by `percentage` percent. Salaried categories only.
    ///
    /// Returns the new monthly salary.
    pub fn give_raise(&mut self, percentage: Decimal) -> LedgerResult<Decimal> {
        let salary = self.category.give_raise(percentage)?;
        info!(employee_id = %self.profile.id, %percentage, new_salary = %salary, "Raise applied");
        Ok(salary)
    }

    /// Replaces the bonus. Managers only; developer bonuses follow completed projects.
    ///
    /// Returns the new bonus.
    pub fn set_bonus(&mut self, amount: Decimal) -> LedgerResult<Decimal> {
        let bonus = self.category.set_bonus(amount)?;
        info!(employee_id = %self.profile.id, bonus = %bonus, "Bonus set");
        Ok(bonus)
    }

    /// Records a completed project. Developers only.
    ///
    /// Returns the new number of completed projects.
    pub fn complete_project(&mut self) -> LedgerResult<u32> {
        let projects = self.category.complete_project()?;
        info!(employee_id = %self.profile.id, projects, "Project completed");
        Ok(projects)
    }

    /// Logs worked hours. Part-time employees and interns only.
    ///
    /// Returns the new total of hours worked.
    pub fn log_hours(&mut self, hours: i32) -> LedgerResult<i32> {
        let total = self.category.log_hours(hours)?;
        info!(employee_id = %self.profile.id, hours, total_hours = total, "Hours logged");
        Ok(total)
    }

    /// Marks the contract as completed. Contract employees only; irreversible.
    ///
    /// Returns the new gross pay.
    pub fn complete_contract(&mut self) -> LedgerResult<Decimal> {
        let pay = self.category.complete_contract()?;
        info!(employee_id = %self.profile.id, gross_pay = %pay, "Contract completed");
        Ok(pay)
    }
}
