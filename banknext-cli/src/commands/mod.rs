//! CLI command implementations

pub mod accounts;
pub mod auth;
pub mod bulk;
pub mod config;
pub mod dashboard;
pub mod payments;
pub mod report;
pub mod transactions;
pub mod transfer;

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use banknext_core::{BankContext, DATA_DIR_ENV};
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;

/// Get the BankNext data directory from environment or default
pub fn get_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".banknext"))
        .context("Could not find home directory; set BANKNEXT_DIR")
}

/// Build the context and restore the saved session
pub fn get_context() -> Result<BankContext> {
    let data_dir = get_data_dir()?;

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;

    BankContext::new(&data_dir).context("Failed to initialize BankNext")
}

/// Extra line to print when the server refused us for lack of a session
pub fn login_hint(error: &anyhow::Error) -> Option<&'static str> {
    match error.downcast_ref::<banknext_core::Error>()?.status()? {
        401 | 403 => Some("Your session is missing or expired. Run 'bn login' and try again."),
        _ => None,
    }
}

/// Run `work` with a spinner on interactive terminals
pub fn with_spinner<T>(message: &str, work: impl FnOnce() -> T) -> T {
    if atty::isnt(atty::Stream::Stderr) {
        return work();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = work();
    spinner.finish_and_clear();
    result
}

/// Parse a user-entered amount such as `1,500.00`
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&cleaned).with_context(|| format!("Invalid amount: '{}'", raw))
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
