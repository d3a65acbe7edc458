//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the ledger
//! configuration from a YAML file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::DEFAULT_TOP_EARNERS;

/// Settings supplied by the caller of the ledger.
///
/// # Example
///
/// ```
/// use payroll_ledger::config::LedgerConfig;
///
/// let config: LedgerConfig = serde_yaml::from_str("company_name: Acme Ltd").unwrap();
/// assert_eq!(config.company_name, "Acme Ltd");
/// assert_eq!(config.data_file.to_str(), Some("employees.txt"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Company name printed at the top of the export report.
    pub company_name: String,
    /// The flat employee data file.
    pub data_file: PathBuf,
    /// Default destination of the export report.
    pub export_file: PathBuf,
    /// Address the HTTP API listens on.
    pub bind_address: String,
    /// Default number of entries in the top earners ranking.
    pub top_earners_limit: usize,
    /// `tracing` filter directive, e.g. `info` or `payroll_ledger=debug`.
    pub log_level: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            company_name: "TechCorp Solutions".to_string(),
            data_file: PathBuf::from("employees.txt"),
            export_file: PathBuf::from("employee_report.txt"),
            bind_address: "127.0.0.1:3000".to_string(),
            top_earners_limit: DEFAULT_TOP_EARNERS,
            log_level: "info".to_string(),
        }
    }
}

/// Loads and provides access to the ledger configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: LedgerConfig,
}

impl ConfigLoader {
    /// Loads configuration from a YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file exists but cannot be read as text (`ReadFailed`)
    /// - The file is not valid YAML for [`LedgerConfig`] (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> LedgerResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LedgerError::ConfigNotFound {
                path: path_str.clone(),
            },
            _ => LedgerError::ReadFailed {
                path: path_str.clone(),
                message: e.to_string(),
            },
        })?;

        let config = if content.trim().is_empty() {
            LedgerConfig::default()
        } else {
            serde_yaml::from_str(&content).map_err(|e| LedgerError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?
        };

        Ok(Self { config })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> LedgerConfig {
        self.config
    }
}
