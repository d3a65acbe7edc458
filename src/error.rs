//! Error types for the payroll ledger.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading, querying and
//! mutating the ledger. None of them is fatal: every failure is reported
//! to the caller and leaves the ledger state unchanged.

use thiserror::Error;

/// The main error type for the payroll ledger.
///
/// # Example
///
/// ```
/// use payroll_ledger::error::LedgerError;
///
/// let error = LedgerError::NotFound {
///     id: "M999".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: M999");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The employee data file does not exist.
    #[error("Employee data file not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// The employee data file exists but could not be read.
    #[error("Failed to read '{path}': {message}")]
    ReadFailed {
        /// The path that could not be read.
        path: String,
        /// The underlying I/O error message.
        message: String,
    },

    /// A record line started with a known keyword but its fields were unusable.
    #[error("Malformed record on line {line}: {message}")]
    MalformedRecord {
        /// The 1-based line number within the data file.
        line: usize,
        /// A description of what was wrong with the line.
        message: String,
    },

    /// No employee with the given ID exists in the ledger.
    #[error("Employee not found: {id}")]
    NotFound {
        /// The ID that was looked up.
        id: String,
    },

    /// A caller-supplied value was rejected.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A category-restricted operation was invoked on the wrong category.
    #[error("Operation '{operation}' is not applicable to {category}")]
    UnsupportedOperation {
        /// The operation that was attempted.
        operation: String,
        /// The display name of the employee's category.
        category: String,
    },

    /// A file could not be written (export report or sample bootstrap).
    #[error("Failed to write '{path}': {message}")]
    WriteFailed {
        /// The destination path.
        path: String,
        /// The underlying I/O error message.
        message: String,
    },
}

/// A type alias for Results that return LedgerError.
pub type LedgerResult<T> = Result<T, LedgerError>;
