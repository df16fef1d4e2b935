//! Accounts command - list, show, create, freeze and unfreeze

use anyhow::{anyhow, Result};
use clap::Subcommand;
use colored::Colorize;
use comfy_table::{Cell, Color};

use banknext_core::domain::{Account, AccountStatus, CreateAccountRequest};
use banknext_core::AccountType;

use super::{get_context, print_json, with_spinner};
use crate::output::{self, format_amount, HIDDEN_BALANCE};

#[derive(Subcommand)]
pub enum AccountCommands {
    /// List a customer's accounts
    List {
        /// Numeric customer ID (defaults to the saved profile's if numeric)
        #[arg(long)]
        customer_id: Option<String>,
        /// Mask balances
        #[arg(long)]
        hide_balance: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one account
    Show {
        /// Account number
        account_number: String,
        /// Mask the balance
        #[arg(long)]
        hide_balance: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Open a new account
    Create {
        /// savings, current, fixed-deposit, salary or islamic
        #[arg(long = "type")]
        account_type: String,
        /// Currency code
        #[arg(long)]
        currency: Option<String>,
        /// Numeric customer ID (defaults to the saved profile's if numeric)
        #[arg(long)]
        customer_id: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Freeze an account
    Freeze {
        /// Account number
        account_number: String,
    },
    /// Lift a freeze
    Unfreeze {
        /// Account number
        account_number: String,
    },
}

pub fn run(command: AccountCommands) -> Result<()> {
    match command {
        AccountCommands::List { customer_id, hide_balance, json } => {
            run_list(customer_id.as_deref(), hide_balance, json)
        }
        AccountCommands::Show { account_number, hide_balance, json } => {
            run_show(&account_number, hide_balance, json)
        }
        AccountCommands::Create { account_type, currency, customer_id, json } => {
            run_create(&account_type, currency, customer_id.as_deref(), json)
        }
        AccountCommands::Freeze { account_number } => run_freeze(&account_number, true),
        AccountCommands::Unfreeze { account_number } => run_freeze(&account_number, false),
    }
}

fn balance_text(account: &Account, hide: bool) -> String {
    if hide {
        format!("{} {}", account.currency, HIDDEN_BALANCE)
    } else {
        format_amount(account.balance, &account.currency)
    }
}

fn status_cell(status: AccountStatus) -> Cell {
    let color = match status {
        AccountStatus::Active => Color::Green,
        AccountStatus::Frozen => Color::Cyan,
        AccountStatus::Inactive | AccountStatus::Dormant => Color::Yellow,
        AccountStatus::Closed => Color::Red,
        AccountStatus::Other => Color::Grey,
    };
    Cell::new(status.as_str()).fg(color)
}

fn run_list(customer_id: Option<&str>, hide_balance: bool, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let customer_id = ctx.customer_id(customer_id)?;

    let accounts = with_spinner("Loading accounts...", || {
        ctx.account_service.list_for_customer(&customer_id)
    })?;

    if json {
        return print_json(&accounts);
    }

    if accounts.is_empty() {
        output::info("No accounts found.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Account", "Type", "Balance", "Available", "Status"]);
    for account in &accounts {
        let available = match (hide_balance, account.available_balance) {
            (true, _) => HIDDEN_BALANCE.to_string(),
            (false, Some(amount)) => format_amount(amount, &account.currency),
            (false, None) => "-".to_string(),
        };
        table.add_row(vec![
            Cell::new(account.masked_number()),
            Cell::new(account.account_type.to_string()),
            Cell::new(balance_text(account, hide_balance)),
            Cell::new(available),
            status_cell(account.status),
        ]);
    }

    println!("{}", table);
    println!("{} account(s)", accounts.len());
    Ok(())
}

fn run_show(account_number: &str, hide_balance: bool, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let account = with_spinner("Loading account...", || ctx.account_service.get(account_number))?;

    if json {
        return print_json(&account);
    }

    let mut table = output::create_table();
    let mut row = |label: &str, value: String| {
        table.add_row(vec![label.to_string(), value]);
    };
    row("Account number", account.account_number.clone());
    if let Some(iban) = &account.iban {
        row("IBAN", iban.clone());
    }
    row("Type", account.account_type.to_string());
    row("Status", account.status.to_string());
    row("Balance", balance_text(&account, hide_balance));
    if let Some(available) = account.available_balance {
        let text = if hide_balance {
            HIDDEN_BALANCE.to_string()
        } else {
            format_amount(available, &account.currency)
        };
        row("Available", text);
    }
    if let Some(branch) = account.branch_name.as_ref().or(account.branch_code.as_ref()) {
        row("Branch", branch.clone());
    }
    if let Some(rate) = account.interest_rate {
        row("Interest rate", format!("{}%", rate));
    }
    if let Some(limit) = account.overdraft_limit {
        row("Overdraft limit", format_amount(limit, &account.currency));
    }
    if let Some(opened) = account.created_at {
        row("Opened", opened.format("%Y-%m-%d").to_string());
    }

    println!("{}", table);
    if account.is_frozen() {
        output::warning("This account is frozen. Debits are blocked until it is unfrozen.");
    }
    Ok(())
}

fn run_create(
    account_type: &str,
    currency: Option<String>,
    customer_id: Option<&str>,
    json: bool,
) -> Result<()> {
    let account_type: AccountType = account_type.parse().map_err(|e: String| anyhow!(e))?;
    let ctx = get_context()?;
    let customer_id = ctx.customer_id(customer_id)?;

    let currency = currency.unwrap_or_else(|| ctx.config.default_currency.clone());
    let request = CreateAccountRequest::new(customer_id, account_type).with_currency(currency);

    let account = with_spinner("Opening account...", || ctx.account_service.create(&request))?;

    if json {
        return print_json(&account);
    }

    output::success(&format!(
        "Opened {} account {}",
        account.account_type,
        account.account_number.bold()
    ));
    if let Some(iban) = &account.iban {
        println!("  IBAN: {}", iban);
    }
    Ok(())
}

fn run_freeze(account_number: &str, freeze: bool) -> Result<()> {
    let ctx = get_context()?;

    let message = if freeze {
        with_spinner("Freezing account...", || ctx.account_service.freeze(account_number))?
    } else {
        with_spinner("Unfreezing account...", || ctx.account_service.unfreeze(account_number))?
    };

    let message = message.trim();
    if message.is_empty() {
        output::success(if freeze { "Account frozen" } else { "Account unfrozen" });
    } else {
        output::success(message);
    }
    Ok(())
}
