//! Application state for the payroll ledger API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::LedgerConfig;
use crate::ledger::PayrollLedger;

/// Shared application state.
///
/// The whole ledger sits behind one mutex. Each handler holds the lock for
/// exactly one ledger operation and never across an `.await`.
#[derive(Clone)]
pub struct AppState {
    ledger: Arc<Mutex<PayrollLedger>>,
    config: Arc<LedgerConfig>,
}

impl AppState {
    /// Creates a new application state from a loaded ledger and its configuration.
    pub fn new(ledger: PayrollLedger, config: LedgerConfig) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
            config: Arc::new(config),
        }
    }

    /// Locks the ledger for one operation.
    ///
    /// A panic in another handler cannot leave a record half-mutated, so a
    /// poisoned lock is recovered rather than propagated.
    pub fn ledger(&self) -> MutexGuard<'_, PayrollLedger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }
}
