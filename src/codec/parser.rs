//! Record line parsing.
//!
//! Each record line has three sections: a whitespace-delimited prefix
//! (type keyword and numeric identity fields), a run of `|`-delimited text
//! fields terminated by a final `|`, and a whitespace-delimited numeric
//! suffix:
//!
//! ```text
//! MANAGER   <id> <age> <exp> |<name>|<address>|<department>|<joinDate>| <salary> <teamSize>
//! DEVELOPER <id> <age> <exp> |<name>|<address>|<department>|<joinDate>|<language>| <salary> <projects>
//! PARTTIME  <id> <age> <exp> |<name>|<address>|<department>|<joinDate>| <rate> <hours>
//! INTERN    <id> <age>       |<name>|<address>|<department>|<joinDate>|<university>|<mentor>| <hours>
//! CONTRACT  <id> <age> <exp> |<name>|<address>|<department>|<joinDate>|<endDate>| <amount> <completed>
//! ```
//!
//! Text fields are kept verbatim, including surrounding spaces.

use std::str::{FromStr, SplitWhitespace};

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Employee, EmployeeProfile, is_valid_money_amount, max_money_amount};

/// The record types understood by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// `MANAGER` lines.
    Manager,
    /// `DEVELOPER` lines.
    Developer,
    /// `PARTTIME` lines.
    PartTime,
    /// `INTERN` lines.
    Intern,
    /// `CONTRACT` lines.
    Contract,
}

impl RecordKind {
    /// All record kinds, in the order they appear in the sample file.
    pub const ALL: [RecordKind; 5] = [
        RecordKind::Manager,
        RecordKind::Developer,
        RecordKind::PartTime,
        RecordKind::Intern,
        RecordKind::Contract,
    ];

    /// Matches a leading type token. Matching is case-sensitive.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }

    /// The type token that starts lines of this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            RecordKind::Manager => "MANAGER",
            RecordKind::Developer => "DEVELOPER",
            RecordKind::PartTime => "PARTTIME",
            RecordKind::Intern => "INTERN",
            RecordKind::Contract => "CONTRACT",
        }
    }

    /// Names of the `|`-delimited text fields, in order.
    fn text_fields(self) -> &'static [&'static str] {
        match self {
            RecordKind::Manager | RecordKind::PartTime => {
                &["name", "address", "department", "join date"]
            }
            RecordKind::Developer => &["name", "address", "department", "join date", "language"],
            RecordKind::Intern => &[
                "name",
                "address",
                "department",
                "join date",
                "university",
                "mentor",
            ],
            RecordKind::Contract => &["name", "address", "department", "join date", "end date"],
        }
    }

    fn has_experience(self) -> bool {
        self != RecordKind::Intern
    }
}

/// Walks one whitespace-delimited section of a line.
struct TokenCursor<'a> {
    tokens: SplitWhitespace<'a>,
    line: usize,
    section: &'static str,
}

impl<'a> TokenCursor<'a> {
    fn new(text: &'a str, line: usize, section: &'static str) -> Self {
        Self {
            tokens: text.split_whitespace(),
            line,
            section,
        }
    }

    fn next_token(&mut self, field: &str) -> LedgerResult<&'a str> {
        self.tokens.next().ok_or_else(|| LedgerError::MalformedRecord {
            line: self.line,
            message: format!("missing {} {}", self.section, field),
        })
    }

    fn parse<T: FromStr>(&mut self, field: &str) -> LedgerResult<T> {
        let token = self.next_token(field)?;
        token.parse().map_err(|_| LedgerError::MalformedRecord {
            line: self.line,
            message: format!("invalid {} '{}'", field, token),
        })
    }

    /// Reads a money amount within [`max_money_amount`].
    fn money(&mut self, field: &str) -> LedgerResult<Decimal> {
        let token = self.next_token(field)?;
        let amount = Decimal::from_str(token).map_err(|_| LedgerError::MalformedRecord {
            line: self.line,
            message: format!("invalid {} '{}'", field, token),
        })?;
        if !is_valid_money_amount(amount) {
            return Err(LedgerError::MalformedRecord {
                line: self.line,
                message: format!(
                    "{} '{}' exceeds the limit of {}",
                    field,
                    token,
                    max_money_amount()
                ),
            });
        }
        Ok(amount)
    }

    fn flag(&mut self, field: &str) -> LedgerResult<bool> {
        match self.next_token(field)? {
            "0" => Ok(false),
            "1" => Ok(true),
            other => Err(LedgerError::MalformedRecord {
                line: self.line,
                message: format!("{} must be 0 or 1, got '{}'", field, other),
            }),
        }
    }

    fn finish(mut self) -> LedgerResult<()> {
        match self.tokens.next() {
            None => Ok(()),
            Some(extra) => Err(LedgerError::MalformedRecord {
                line: self.line,
                message: format!("unexpected {} field '{}'", self.section, extra),
            }),
        }
    }
}

/// Parses one line of the data file.
///
/// Returns `Ok(None)` for lines that are not records: blank lines, `#`
/// comments and lines whose first token is not a known keyword. A line
/// with a known keyword but unusable fields is a
/// [`LedgerError::MalformedRecord`].
///
/// # Examples
///
/// ```
/// use payroll_ledger::codec::parse_line;
///
/// let line = "PARTTIME P001 45 15 |David Brown|321 Elm St|Support|2022-01-01| 25.0 80";
/// let employee = parse_line(line, 1).unwrap().unwrap();
/// assert_eq!(employee.name(), "David Brown");
///
/// assert!(parse_line("# comment", 2).unwrap().is_none());
/// assert!(parse_line("MANAGER M002 abc", 3).is_err());
/// ```
pub fn parse_line(line: &str, line_number: usize) -> LedgerResult<Option<Employee>> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (keyword, rest) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));
    let Some(kind) = RecordKind::from_keyword(keyword) else {
        debug!(line = line_number, keyword, "Skipping non-record line");
        return Ok(None);
    };

    parse_record(kind, rest, line_number).map(Some)
}

fn parse_record(kind: RecordKind, rest: &str, line: usize) -> LedgerResult<Employee> {
    let (head, tail) = match rest.split_once('|') {
        Some((head, tail)) => (head, Some(tail)),
        None => (rest, None),
    };

    let mut prefix = TokenCursor::new(head, line, "prefix");
    let id = prefix.next_token("id")?.to_string();
    let age: u32 = prefix.parse("age")?;
    let experience_years: u32 = if kind.has_experience() {
        prefix.parse("experience")?
    } else {
        0
    };
    prefix.finish()?;

    let field_names = kind.text_fields();
    let tail = tail.ok_or_else(|| LedgerError::MalformedRecord {
        line,
        message: "missing '|' delimited fields".to_string(),
    })?;
    let sections: Vec<&str> = tail.splitn(field_names.len() + 1, '|').collect();
    if sections.len() <= field_names.len() {
        return Err(LedgerError::MalformedRecord {
            line,
            message: format!(
                "expected {} '|' delimited fields ({}), found {}",
                field_names.len(),
                field_names.join(", "),
                sections.len().saturating_sub(1)
            ),
        });
    }
    let (text, suffix) = sections.split_at(field_names.len());
    let mut suffix = TokenCursor::new(suffix[0], line, "suffix");

    let profile = EmployeeProfile {
        id,
        name: text[0].to_string(),
        age,
        address: text[1].to_string(),
        department: text[2].to_string(),
        join_date: text[3].to_string(),
        experience_years,
    };

    let employee = match kind {
        RecordKind::Manager => {
            let salary = suffix.money("salary")?;
            let team_size = suffix.parse("team size")?;
            Employee::manager(profile, salary, team_size)
        }
        RecordKind::Developer => {
            let salary = suffix.money("salary")?;
            let projects = suffix.parse("projects")?;
            Employee::developer(profile, salary, text[4], projects)
        }
        RecordKind::PartTime => {
            let rate = suffix.money("hourly rate")?;
            let hours = suffix.parse("hours")?;
            Employee::part_time(profile, rate, hours)
        }
        RecordKind::Intern => {
            let hours = suffix.parse("hours")?;
            Employee::intern(profile, text[4], text[5], hours)
        }
        RecordKind::Contract => {
            let amount = suffix.money("contract amount")?;
            let completed = suffix.flag("completed flag")?;
            Employee::contract(profile, amount, text[4], completed)
        }
    };
    suffix.finish()?;

    Ok(employee)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmployeeCategory;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn parse_ok(line: &str) -> Employee {
        parse_line(line, 1)
            .expect("line should parse")
            .expect("line should be a record")
    }

    fn malformed_message(line: &str) -> String {
        match parse_line(line, 7) {
            Err(LedgerError::MalformedRecord { line, message }) => {
                assert_eq!(line, 7);
                message
            }
            other => panic!("Expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_manager() {
        let employee =
            parse_ok("MANAGER M001 35 10 |Alice Johnson|123 Main St|Engineering|2020-01-15| 8000 5");
        assert_eq!(employee.id(), "M001");
        assert_eq!(employee.profile().age, 35);
        assert_eq!(employee.experience_years(), 10);
        assert_eq!(employee.profile().address, "123 Main St");
        assert_eq!(employee.profile().join_date, "2020-01-15");
        match employee.category() {
            EmployeeCategory::Manager(terms) => {
                assert_eq!(terms.salary().monthly_salary(), dec("8000"));
                assert_eq!(terms.team_size(), 5);
            }
            other => panic!("Expected Manager, got {:?}", other),
        }
        assert_eq!(employee.gross_pay(), dec("10500"));
    }

    #[test]
    fn test_parse_developer() {
        let employee =
            parse_ok("DEVELOPER D001 28 5 |Bob Smith|456 Oak Ave|Engineering|2021-06-01|C++| 6000 2");
        match employee.category() {
            EmployeeCategory::Developer(terms) => {
                assert_eq!(terms.language(), "C++");
                assert_eq!(terms.projects_completed(), 2);
            }
            other => panic!("Expected Developer, got {:?}", other),
        }
        assert_eq!(employee.gross_pay(), dec("6400"));
    }

    #[test]
    fn test_parse_intern_has_no_experience_field() {
        let employee = parse_ok(
            "INTERN I001 22 |Emma Davis|654 Maple Dr|Engineering|2024-09-01|Tech University|Bob Smith| 120",
        );
        assert_eq!(employee.experience_years(), 0);
        match employee.category() {
            EmployeeCategory::Intern(terms) => {
                assert_eq!(terms.university(), "Tech University");
                assert_eq!(terms.mentor(), "Bob Smith");
                assert_eq!(terms.hours().hours_worked(), 120);
            }
            other => panic!("Expected Intern, got {:?}", other),
        }
        assert_eq!(employee.gross_pay(), dec("1800"));
    }

    #[test]
    fn test_parse_contract_flag() {
        let done = parse_ok(
            "CONTRACT C001 40 8 |Frank Miller|987 Cedar Ln|Marketing|2024-01-01|2024-12-31| 15000 1",
        );
        let open = parse_ok(
            "CONTRACT C002 40 8 |Frank Miller|987 Cedar Ln|Marketing|2024-01-01|2024-12-31| 15000 0",
        );
        assert_eq!(done.gross_pay(), dec("15000"));
        assert_eq!(open.gross_pay(), dec("7500"));
    }

    #[test]
    fn test_text_fields_kept_verbatim() {
        let employee = parse_ok("PARTTIME P009 30 1 |  Spaced Name |addr|Support |2022| 10 1");
        assert_eq!(employee.name(), "  Spaced Name ");
        assert_eq!(employee.department(), "Support ");
    }

    #[test]
    fn test_crlf_and_extra_whitespace_accepted() {
        let employee = parse_ok("  PARTTIME\tP002  45 15 |A|B|Support|2022-01-01|   25.5   4  \r");
        assert_eq!(employee.gross_pay(), dec("102"));
    }

    #[test]
    fn test_non_record_lines_skipped() {
        for line in ["", "   ", "# Employee Data File", "manager M001 1 1 |a|b|c|d| 1 1", "VENDOR V1 2 3"] {
            assert!(parse_line(line, 1).unwrap().is_none(), "line {:?}", line);
        }
    }

    #[test]
    fn test_non_numeric_age_is_malformed() {
        let message = malformed_message("MANAGER M002 abc");
        assert_eq!(message, "invalid age 'abc'");
    }

    #[test]
    fn test_missing_suffix_field_is_malformed() {
        let message = malformed_message("MANAGER M003 35 10 |A|B|C|D| 8000");
        assert_eq!(message, "missing suffix team size");
    }

    #[test]
    fn test_missing_text_field_is_malformed() {
        let message = malformed_message("DEVELOPER D002 28 5 |Bob|Addr|Eng|2021| 6000 2");
        assert!(message.contains("expected 5 '|' delimited fields"), "{}", message);
    }

    #[test]
    fn test_extra_prefix_token_is_malformed() {
        let message = malformed_message("PARTTIME P003 45 15 99 |A|B|C|D| 25 80");
        assert_eq!(message, "unexpected prefix field '99'");
    }

    #[test]
    fn test_extra_text_field_is_malformed() {
        let message = malformed_message("MANAGER M004 35 10 |A|B|C|D|E| 8000 5");
        assert!(message.starts_with("invalid salary"), "{}", message);
    }

    #[test]
    fn test_bad_completed_flag_is_malformed() {
        let message = malformed_message("CONTRACT C003 40 8 |A|B|C|D|E| 15000 2");
        assert_eq!(message, "completed flag must be 0 or 1, got '2'");
    }

    #[test]
    fn test_salary_beyond_limit_is_malformed() {
        let message = malformed_message(
            "MANAGER M005 35 10 |A|B|C|D| 50000000000000000000000000000 0",
        );
        assert_eq!(
            message,
            "salary '50000000000000000000000000000' exceeds the limit of 1000000000000"
        );
    }

    #[test]
    fn test_rate_beyond_limit_is_malformed() {
        let message = malformed_message("PARTTIME P005 45 15 |A|B|C|D| 79228162514264337593543950335 2");
        assert!(message.starts_with("hourly rate '"), "{}", message);
        let message = malformed_message("CONTRACT C004 40 8 |A|B|C|D|E| -1000000000000.01 0");
        assert!(message.starts_with("contract amount '"), "{}", message);
    }

    #[test]
    fn test_largest_accepted_values_keep_pay_representable() {
        let manager = parse_ok("MANAGER M006 35 10 |A|B|C|D| 1000000000000 4294967295");
        let part_time = parse_ok("PARTTIME P006 45 15 |A|B|C|D| 1000000000000 2147483647");
        let developer = parse_ok("DEVELOPER D003 28 5 |A|B|C|D|Rust| 1000000000000 4294967295");

        assert_eq!(
            manager.gross_pay(),
            dec("1000000000000") + dec("500") * Decimal::from(u32::MAX)
        );
        assert_eq!(part_time.net_pay(), part_time.gross_pay() - part_time.tax());
        assert!(developer.gross_pay() > dec("1000000000000"));
    }

    #[test]
    fn test_negative_hours_accepted() {
        let employee = parse_ok("PARTTIME P004 45 15 |A|B|C|D| 10 -3");
        assert_eq!(employee.gross_pay(), dec("-30"));
    }

    #[test]
    fn test_keyword_round_trip() {
        for kind in RecordKind::ALL {
            assert_eq!(RecordKind::from_keyword(kind.keyword()), Some(kind));
        }
        assert_eq!(RecordKind::from_keyword("Intern"), None);
    }
}
