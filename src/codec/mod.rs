//! Flat-file record format.
//!
//! This module reads the line-oriented employee data file into
//! [`Employee`](crate::models::Employee) records, bootstraps a sample file
//! when none exists, and renders the plain-text export report.
//!
//! # Example
//!
//! ```no_run
//! use payroll_ledger::codec::load_employees;
//!
//! let parsed = load_employees("employees.txt").unwrap();
//! println!("{} employees loaded", parsed.report.loaded);
//! ```

mod loader;
mod parser;
mod report;

pub use loader::{
    LoadReport, MAX_REPORTED_ERRORS, ParsedDocument, SAMPLE_DATA, load_employees, parse_document,
    read_data_file, write_sample_file,
};
pub use parser::{RecordKind, parse_line};
pub use report::{export_report, format_money, render_report};
