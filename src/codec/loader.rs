//! Data file loading and sample bootstrap.
//!
//! A load never aborts on a bad record: malformed lines are logged,
//! counted and skipped, and parsing continues with the next line.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::Employee;

use super::parser::parse_line;

/// Maximum number of per-line errors kept in a [`LoadReport`].
pub const MAX_REPORTED_ERRORS: usize = 10;

/// Contents written when the data file does not exist: one record of each kind.
pub const SAMPLE_DATA: &str = "\
# Employee Data File
MANAGER M001 35 10 |Alice Johnson|123 Main St|Engineering|2020-01-15| 8000 5
DEVELOPER D001 28 5 |Bob Smith|456 Oak Ave|Engineering|2021-06-01|C++| 6000 2
PARTTIME P001 45 15 |David Brown|321 Elm St|Support|2022-01-01| 25.0 80
INTERN I001 22 |Emma Davis|654 Maple Dr|Engineering|2024-09-01|Tech University|Bob Smith| 120
CONTRACT C001 40 8 |Frank Miller|987 Cedar Ln|Marketing|2024-01-01|2024-12-31| 15000 1
";

/// Summary of one load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadReport {
    /// Number of records parsed and added.
    pub loaded: usize,
    /// Number of record lines discarded as malformed.
    pub failed: usize,
    /// The first [`MAX_REPORTED_ERRORS`] per-line errors, in file order.
    pub errors: Vec<LedgerError>,
    /// Whether the sample file had to be written first.
    pub bootstrapped: bool,
}

/// Records parsed from a document, with the per-line outcome summary.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// Successfully parsed employees in file order.
    pub employees: Vec<Employee>,
    /// Load summary; `bootstrapped` is always `false` here.
    pub report: LoadReport,
}

/// Parses every line of `content`, continuing past malformed records.
///
/// # Examples
///
/// ```
/// use payroll_ledger::codec::{parse_document, SAMPLE_DATA};
///
/// let parsed = parse_document(SAMPLE_DATA);
/// assert_eq!(parsed.employees.len(), 5);
/// assert_eq!(parsed.report.failed, 0);
/// ```
pub fn parse_document(content: &str) -> ParsedDocument {
    let mut employees = Vec::new();
    let mut report = LoadReport::default();

    for (index, line) in content.lines().enumerate() {
        match parse_line(line, index + 1) {
            Ok(Some(employee)) => employees.push(employee),
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "Discarding malformed record");
                report.failed += 1;
                if report.errors.len() < MAX_REPORTED_ERRORS {
                    report.errors.push(err);
                }
            }
        }
    }

    report.loaded = employees.len();
    warn_on_duplicate_ids(&employees);
    ParsedDocument { employees, report }
}

fn warn_on_duplicate_ids(employees: &[Employee]) {
    let mut seen = HashSet::new();
    for employee in employees {
        if !seen.insert(employee.id()) {
            warn!(
                employee_id = %employee.id(),
                "Duplicate employee ID; lookups resolve to the first record"
            );
        }
    }
}

/// Reads the data file, reporting a missing file as [`LedgerError::FileNotFound`].
pub fn read_data_file<P: AsRef<Path>>(path: P) -> LedgerResult<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|err| {
        let path = path.display().to_string();
        if err.kind() == ErrorKind::NotFound {
            LedgerError::FileNotFound { path }
        } else {
            LedgerError::ReadFailed {
                path,
                message: err.to_string(),
            }
        }
    })
}

/// Writes [`SAMPLE_DATA`] to `path`.
pub fn write_sample_file<P: AsRef<Path>>(path: P) -> LedgerResult<()> {
    let path = path.as_ref();
    fs::write(path, SAMPLE_DATA).map_err(|err| LedgerError::WriteFailed {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    info!(path = %path.display(), "Sample data file created");
    Ok(())
}

/// Loads employees from `path`, writing the sample file first if it is missing.
///
/// Fails only if the file cannot be read, or is missing and the sample
/// cannot be written.
pub fn load_employees<P: AsRef<Path>>(path: P) -> LedgerResult<ParsedDocument> {
    let path = path.as_ref();

    let (content, bootstrapped) = match read_data_file(path) {
        Ok(content) => (content, false),
        Err(LedgerError::FileNotFound { .. }) => {
            warn!(path = %path.display(), "Data file not found, creating sample file");
            write_sample_file(path)?;
            (read_data_file(path)?, true)
        }
        Err(err) => return Err(err),
    };

    let mut parsed = parse_document(&content);
    parsed.report.bootstrapped = bootstrapped;
    info!(
        path = %path.display(),
        loaded = parsed.report.loaded,
        failed = parsed.report.failed,
        bootstrapped,
        "Employees loaded"
    );
    Ok(parsed)
}
