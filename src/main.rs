//! Payroll ledger server.
//!
//! Usage: `payroll-ledger [CONFIG_PATH]`
//!
//! Loads the employee data file named in the configuration (writing the
//! sample file if it does not exist) and serves the ledger API.

use payroll_ledger::api::{AppState, create_router};
use payroll_ledger::config::{ConfigLoader, LedgerConfig};
use payroll_ledger::ledger::PayrollLedger;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => ConfigLoader::load(path)?.into_config(),
        None => LedgerConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_level)?)
        .init();

    let mut ledger = PayrollLedger::new();
    let report = ledger.load(&config.data_file)?;
    if report.failed > 0 {
        warn!(
            failed = report.failed,
            shown = report.errors.len(),
            "Some records were discarded"
        );
    }
    info!(
        employees = ledger.len(),
        company = %config.company_name,
        "Ledger ready"
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!(address = %config.bind_address, "Listening");

    let app = create_router(AppState::new(ledger, config));
    axum::serve(listener, app).await?;
    Ok(())
}
