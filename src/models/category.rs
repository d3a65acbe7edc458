//! Employment categories and their pay rules.
//!
//! Each variant of [`EmployeeCategory`] carries the payload that its pay
//! formula needs. Pay is always derived from the current payload, never
//! stored.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};

/// Bonus added per team member for managers (fixed at construction).
pub fn team_bonus_per_member() -> Decimal {
    Decimal::from(500)
}

/// Bonus earned by a developer for each completed project.
pub fn project_bonus() -> Decimal {
    Decimal::from(200)
}

/// Fixed hourly rate for interns.
pub fn intern_hourly_rate() -> Decimal {
    Decimal::new(150, 1)
}

/// Share of the contract amount paid while a contract is in progress.
pub fn incomplete_contract_share() -> Decimal {
    Decimal::new(5, 1)
}

/// Hours in a standard month, used to express hourly pay as a base salary.
pub const STANDARD_MONTHLY_HOURS: i32 = 160;

/// Largest magnitude accepted for a stored money amount.
///
/// Salaries, bonuses, hourly rates and contract amounts are all held within
/// this bound, so every derived pay figure and every ledger-wide sum stays
/// representable as a [`Decimal`].
pub fn max_money_amount() -> Decimal {
    Decimal::from(1_000_000_000_000i64)
}

/// Whether `amount` may be stored as a salary, bonus, rate or contract amount.
pub fn is_valid_money_amount(amount: Decimal) -> bool {
    amount.abs() <= max_money_amount()
}

fn check_money_amount(field: &str, amount: Decimal) -> LedgerResult<Decimal> {
    if is_valid_money_amount(amount) {
        Ok(amount)
    } else {
        Err(LedgerError::InvalidInput {
            field: field.to_string(),
            message: format!("{} exceeds the limit of {}", amount, max_money_amount()),
        })
    }
}

/// Monthly salary plus a replaceable bonus, shared by salaried categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalaryTerms {
    monthly_salary: Decimal,
    bonus: Decimal,
}

impl SalaryTerms {
    /// Creates salary terms with no bonus.
    pub fn new(monthly_salary: Decimal) -> Self {
        Self {
            monthly_salary,
            bonus: Decimal::ZERO,
        }
    }

    /// The current monthly salary.
    pub fn monthly_salary(&self) -> Decimal {
        self.monthly_salary
    }

    /// The current bonus.
    pub fn bonus(&self) -> Decimal {
        self.bonus
    }

    fn pay(&self) -> Decimal {
        self.monthly_salary + self.bonus
    }

    /// Applies a percentage raise and returns the new monthly salary.
    ///
    /// Negative percentages are accepted and reduce the salary. A raise that
    /// would take the salary past [`max_money_amount`] is rejected and leaves
    /// the salary unchanged.
    fn give_raise(&mut self, percentage: Decimal) -> LedgerResult<Decimal> {
        let raised = percentage
            .checked_div(Decimal::ONE_HUNDRED)
            .and_then(|fraction| self.monthly_salary.checked_mul(fraction))
            .and_then(|increase| self.monthly_salary.checked_add(increase))
            .filter(|salary| is_valid_money_amount(*salary))
            .ok_or_else(|| LedgerError::InvalidInput {
                field: "percentage".to_string(),
                message: format!(
                    "raise of {}% takes the salary past {}",
                    percentage,
                    max_money_amount()
                ),
            })?;
        self.monthly_salary = raised;
        Ok(self.monthly_salary)
    }
}

/// Payload for managers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagerTerms {
    #[serde(flatten)]
    salary: SalaryTerms,
    team_size: u32,
    team_bonus: Decimal,
}

impl ManagerTerms {
    /// Creates manager terms; the team bonus is fixed from the team size here.
    pub fn new(monthly_salary: Decimal, team_size: u32) -> Self {
        Self {
            salary: SalaryTerms::new(monthly_salary),
            team_size,
            team_bonus: team_bonus_per_member() * Decimal::from(team_size),
        }
    }

    /// Salary and bonus.
    pub fn salary(&self) -> &SalaryTerms {
        &self.salary
    }

    /// Number of people managed.
    pub fn team_size(&self) -> u32 {
        self.team_size
    }

    /// Bonus derived from the team size at construction.
    pub fn team_bonus(&self) -> Decimal {
        self.team_bonus
    }
}

/// Payload for developers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeveloperTerms {
    #[serde(flatten)]
    salary: SalaryTerms,
    language: String,
    projects_completed: u32,
}

impl DeveloperTerms {
    /// Creates developer terms; the bonus is re-derived from completed projects.
    pub fn new(monthly_salary: Decimal, language: impl Into<String>, projects_completed: u32) -> Self {
        let mut salary = SalaryTerms::new(monthly_salary);
        salary.bonus = project_bonus() * Decimal::from(projects_completed);
        Self {
            salary,
            language: language.into(),
            projects_completed,
        }
    }

    /// Salary and project bonus.
    pub fn salary(&self) -> &SalaryTerms {
        &self.salary
    }

    /// Primary programming language.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Number of completed projects.
    pub fn projects_completed(&self) -> u32 {
        self.projects_completed
    }
}

/// Hourly rate and logged hours, shared by part-time staff and interns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyTerms {
    hourly_rate: Decimal,
    hours_worked: i32,
}

impl HourlyTerms {
    /// Creates hourly terms.
    pub fn new(hourly_rate: Decimal, hours_worked: i32) -> Self {
        Self {
            hourly_rate,
            hours_worked,
        }
    }

    /// The hourly rate.
    pub fn hourly_rate(&self) -> Decimal {
        self.hourly_rate
    }

    /// Total hours logged so far.
    pub fn hours_worked(&self) -> i32 {
        self.hours_worked
    }

    fn pay(&self) -> Decimal {
        self.hourly_rate * Decimal::from(self.hours_worked)
    }

    /// Adds hours (negative corrections included) and returns the new total.
    fn log_hours(&mut self, hours: i32) -> LedgerResult<i32> {
        self.hours_worked = self
            .hours_worked
            .checked_add(hours)
            .ok_or_else(|| LedgerError::InvalidInput {
                field: "hours".to_string(),
                message: format!("logging {} hours overflows the total", hours),
            })?;
        Ok(self.hours_worked)
    }
}

/// Payload for interns. The hourly rate is always [`intern_hourly_rate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InternTerms {
    #[serde(flatten)]
    hours: HourlyTerms,
    university: String,
    mentor: String,
}

impl InternTerms {
    /// Creates intern terms at the fixed intern rate.
    pub fn new(university: impl Into<String>, mentor: impl Into<String>, hours_worked: i32) -> Self {
        Self {
            hours: HourlyTerms::new(intern_hourly_rate(), hours_worked),
            university: university.into(),
            mentor: mentor.into(),
        }
    }

    /// Rate and hours.
    pub fn hours(&self) -> &HourlyTerms {
        &self.hours
    }

    /// The intern's university.
    pub fn university(&self) -> &str {
        &self.university
    }

    /// The intern's mentor.
    pub fn mentor(&self) -> &str {
        &self.mentor
    }
}

/// Payload for contract employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractTerms {
    contract_amount: Decimal,
    contract_end_date: String,
    is_completed: bool,
}

impl ContractTerms {
    /// Creates contract terms.
    pub fn new(contract_amount: Decimal, contract_end_date: impl Into<String>, is_completed: bool) -> Self {
        Self {
            contract_amount,
            contract_end_date: contract_end_date.into(),
            is_completed,
        }
    }

    /// The full contract amount.
    pub fn contract_amount(&self) -> Decimal {
        self.contract_amount
    }

    /// The contract end date, as given.
    pub fn contract_end_date(&self) -> &str {
        &self.contract_end_date
    }

    /// Whether the contract has been completed.
    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    fn pay(&self) -> Decimal {
        if self.is_completed {
            self.contract_amount
        } else {
            self.contract_amount * incomplete_contract_share()
        }
    }
}

/// The closed set of employment categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum EmployeeCategory {
    /// Salaried manager with a team bonus.
    Manager(ManagerTerms),
    /// Salaried developer with a per-project bonus.
    Developer(DeveloperTerms),
    /// Hourly part-time employee.
    PartTime(HourlyTerms),
    /// Hourly intern at the fixed intern rate.
    Intern(InternTerms),
    /// Contractor paid on completion.
    Contract(ContractTerms),
}

impl EmployeeCategory {
    /// Display name used on payslips and in the export report.
    pub fn name(&self) -> &'static str {
        match self {
            EmployeeCategory::Manager(_) => "Manager",
            EmployeeCategory::Developer(_) => "Developer",
            EmployeeCategory::PartTime(_) => "Part-Time Employee",
            EmployeeCategory::Intern(_) => "Intern",
            EmployeeCategory::Contract(_) => "Contract Employee",
        }
    }

    /// Gross pay under this category's formula.
    pub fn gross_pay(&self) -> Decimal {
        match self {
            EmployeeCategory::Manager(terms) => terms.salary.pay() + terms.team_bonus,
            EmployeeCategory::Developer(terms) => terms.salary.pay(),
            EmployeeCategory::PartTime(terms) => terms.pay(),
            EmployeeCategory::Intern(terms) => terms.hours.pay(),
            EmployeeCategory::Contract(terms) => terms.pay(),
        }
    }

    /// Nominal monthly base: salary, rate over a standard month, or contract amount.
    pub fn base_salary(&self) -> Decimal {
        match self {
            EmployeeCategory::Manager(terms) => terms.salary.monthly_salary,
            EmployeeCategory::Developer(terms) => terms.salary.monthly_salary,
            EmployeeCategory::PartTime(terms) => {
                terms.hourly_rate * Decimal::from(STANDARD_MONTHLY_HOURS)
            }
            EmployeeCategory::Intern(terms) => {
                terms.hours.hourly_rate * Decimal::from(STANDARD_MONTHLY_HOURS)
            }
            EmployeeCategory::Contract(terms) => terms.contract_amount,
        }
    }

    fn unsupported(&self, operation: &str) -> LedgerError {
        LedgerError::UnsupportedOperation {
            operation: operation.to_string(),
            category: self.name().to_string(),
        }
    }

    pub(crate) fn give_raise(&mut self, percentage: Decimal) -> LedgerResult<Decimal> {
        match self {
            EmployeeCategory::Manager(terms) => terms.salary.give_raise(percentage),
            EmployeeCategory::Developer(terms) => terms.salary.give_raise(percentage),
            _ => Err(self.unsupported("give_raise")),
        }
    }

    pub(crate) fn set_bonus(&mut self, amount: Decimal) -> LedgerResult<Decimal> {
        match self {
            EmployeeCategory::Manager(terms) => {
                terms.salary.bonus = check_money_amount("amount", amount)?;
                Ok(terms.salary.bonus)
            }
            // Developer bonus only moves with completed projects.
            _ => Err(self.unsupported("set_bonus")),
        }
    }

    pub(crate) fn complete_project(&mut self) -> LedgerResult<u32> {
        match self {
            EmployeeCategory::Developer(terms) => {
                terms.projects_completed = terms.projects_completed.checked_add(1).ok_or_else(|| {
                    LedgerError::InvalidInput {
                        field: "projects_completed".to_string(),
                        message: format!("project count is already at the maximum of {}", u32::MAX),
                    }
                })?;
                terms.salary.bonus = project_bonus() * Decimal::from(terms.projects_completed);
                Ok(terms.projects_completed)
            }
            _ => Err(self.unsupported("complete_project")),
        }
    }

    pub(crate) fn log_hours(&mut self, hours: i32) -> LedgerResult<i32> {
        match self {
            EmployeeCategory::PartTime(terms) => terms.log_hours(hours),
            EmployeeCategory::Intern(terms) => terms.hours.log_hours(hours),
            _ => Err(self.unsupported("log_hours")),
        }
    }

    pub(crate) fn complete_contract(&mut self) -> LedgerResult<Decimal> {
        match self {
            EmployeeCategory::Contract(terms) => {
                terms.is_completed = true;
                Ok(terms.pay())
            }
            _ => Err(self.unsupported("complete_contract")),
        }
    }
}
