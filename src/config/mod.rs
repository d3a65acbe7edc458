//! Configuration loading for the payroll ledger.
//!
//! The only settings are file locations, the company name printed on the
//! export report, the HTTP listener address, the default ranking size and
//! the log filter. Every field has a default, so an empty file is valid.
//!
//! # Example
//!
//! ```no_run
//! use payroll_ledger::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/ledger.yaml").unwrap();
//! println!("Company: {}", loader.config().company_name);
//! ```

mod loader;

pub use loader::{ConfigLoader, LedgerConfig};
