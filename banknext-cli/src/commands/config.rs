//! Config command - show and change settings

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use banknext_core::adapters::file_storage::SESSION_FILE;
use banknext_core::config::Config;

use super::{get_data_dir, print_json};
use crate::output;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Point the client at a different API base URL
    SetUrl {
        /// Base URL including the /api prefix
        url: String,
    },
}

pub fn run(command: ConfigCommands) -> Result<()> {
    let data_dir = get_data_dir()?;

    match command {
        ConfigCommands::Show { json } => {
            let config = Config::load(&data_dir)?;
            if json {
                return print_json(&serde_json::json!({
                    "dataDir": data_dir,
                    "apiBaseUrl": config.api_base_url,
                    "defaultCurrency": config.default_currency,
                }));
            }

            let mut table = output::create_table();
            table.add_row(vec!["Data directory".to_string(), data_dir.display().to_string()]);
            table.add_row(vec!["API base URL".to_string(), config.api_base_url]);
            table.add_row(vec!["Default currency".to_string(), config.default_currency]);
            table.add_row(vec![
                "Session file".to_string(),
                data_dir.join(SESSION_FILE).display().to_string(),
            ]);
            println!("{}", "Settings".bold());
            println!("{}", table);
            Ok(())
        }
        ConfigCommands::SetUrl { url } => {
            std::fs::create_dir_all(&data_dir)?;
            let mut config = Config::load(&data_dir)?;
            config.set_api_base_url(&url)?;
            config.save(&data_dir)?;
            output::success(&format!("API base URL set to {}", config.api_base_url));
            if std::env::var(banknext_core::config::API_URL_ENV).is_ok() {
                output::warning("BANKNEXT_API_URL is set and overrides this setting.");
            }
            Ok(())
        }
    }
}
