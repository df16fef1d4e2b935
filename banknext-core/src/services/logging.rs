//! Logging setup - tracing to stderr and the data directory
//!
//! Events never carry credentials, passwords or profile contents. Request
//! logs name the endpoint and status only.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "BANKNEXT_LOG";

/// Log file name inside the logs directory
pub const LOG_FILE: &str = "bn.log";

const DEFAULT_DIRECTIVE: &str = "warn";
const VERBOSE_DIRECTIVE: &str = "warn,banknext_core=debug";

/// Filter directive for this run. `--verbose` wins over the environment.
pub fn filter_directive(verbose: bool, env: Option<&str>) -> String {
    if verbose {
        return VERBOSE_DIRECTIVE.to_string();
    }
    match env.map(str::trim) {
        Some(directive) if !directive.is_empty() => directive.to_string(),
        _ => DEFAULT_DIRECTIVE.to_string(),
    }
}

/// Install the global subscriber.
///
/// Writes to stderr, and also appends to `<log_dir>/bn.log` when a log
/// directory is given. Fails if a subscriber is already installed.
pub fn init_tracing(verbose: bool, log_dir: Option<&Path>) -> Result<()> {
    let directive = filter_directive(verbose, std::env::var(LOG_ENV).ok().as_deref());
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("Invalid log filter '{}'", directive))?;

    let file_layer = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join(LOG_FILE))
                .context("Failed to open log file")?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}
