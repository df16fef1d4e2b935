//! BankNext CLI - your bank accounts in the terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{
    accounts, auth, bulk, config, dashboard, payments, report, transactions, transfer,
};

/// BankNext - your bank accounts in the terminal
#[derive(Parser)]
#[command(name = "bn", version, about, long_about = None)]
struct Cli {
    /// Log requests and session changes to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and remember the session
    Login {
        /// Email address (prompted if omitted)
        #[arg(long)]
        email: Option<String>,
        /// Password (prompted if omitted)
        #[arg(long, env = "BANKNEXT_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Open a customer profile and log in
    Register(auth::RegisterArgs),

    /// Forget the saved session
    Logout,

    /// Show who is logged in
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Balances, income and expenses, and recent activity
    Dashboard {
        /// Numeric customer ID (defaults to the saved profile's if numeric)
        #[arg(long)]
        customer_id: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage accounts
    Accounts {
        #[command(subcommand)]
        command: accounts::AccountCommands,
    },

    /// Transfer money between accounts
    Transfer {
        /// Source account number
        #[arg(long)]
        from: String,
        /// Destination account number
        #[arg(long)]
        to: String,
        /// Amount to transfer
        #[arg(long)]
        amount: String,
        /// Description shown on both statements
        #[arg(long)]
        description: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Deposit money into an account
    Deposit {
        /// Account number to credit
        #[arg(long)]
        account: String,
        /// Amount to deposit
        #[arg(long)]
        amount: String,
        /// Description
        #[arg(long)]
        description: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Withdraw money from an account
    Withdraw {
        /// Account number to debit
        #[arg(long)]
        account: String,
        /// Amount to withdraw
        #[arg(long)]
        amount: String,
        /// Description
        #[arg(long)]
        description: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interbank funds transfer to another bank
    Ibft(payments::IbftArgs),

    /// Instant payment over Raast
    Raast(payments::RaastArgs),

    /// Show transaction history or a single transaction
    Transactions {
        /// Account number whose history to show
        #[arg(long, conflicts_with = "reference", required_unless_present = "reference")]
        account: Option<String>,
        /// Transaction reference to look up
        #[arg(long)]
        reference: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Download a transaction statement
    Report {
        /// Account ID the statement is for
        #[arg(long)]
        account_id: String,
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        from: String,
        /// Last day (YYYY-MM-DD)
        #[arg(long)]
        to: String,
        /// pdf or excel
        #[arg(long, default_value = "pdf")]
        format: String,
        /// Where to save the file (defaults to the suggested file name)
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Open accounts in bulk from a CSV file
    BulkOpen {
        /// Path to the CSV file
        file: PathBuf,
        /// Check the file without uploading it
        #[arg(long)]
        preview: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Ok(data_dir) = commands::get_data_dir() {
        // Logging must never stop a command from running
        let _ = banknext_core::services::init_tracing(cli.verbose, Some(&data_dir.join("logs")));
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            if let Some(hint) = commands::login_hint(&e) {
                output::info(hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Login { email, password } => auth::run_login(email, password),
        Commands::Register(args) => auth::run_register(args),
        Commands::Logout => auth::run_logout(),
        Commands::Whoami { json } => auth::run_whoami(json),
        Commands::Dashboard { customer_id, json } => dashboard::run(customer_id.as_deref(), json),
        Commands::Accounts { command } => accounts::run(command),
        Commands::Transfer { from, to, amount, description, json } => {
            transfer::run_transfer(&from, &to, &amount, description, json)
        }
        Commands::Deposit { account, amount, description, json } => {
            transfer::run_deposit(&account, &amount, description, json)
        }
        Commands::Withdraw { account, amount, description, json } => {
            transfer::run_withdraw(&account, &amount, description, json)
        }
        Commands::Ibft(args) => payments::run_ibft(args),
        Commands::Raast(args) => payments::run_raast(args),
        Commands::Transactions { account, reference, json } => {
            transactions::run(account.as_deref(), reference.as_deref(), json)
        }
        Commands::Report { account_id, from, to, format, output, json } => {
            report::run(&account_id, &from, &to, &format, output, json)
        }
        Commands::BulkOpen { file, preview, json } => bulk::run(&file, preview, json),
        Commands::Config { command } => config::run(command),
    }
}
