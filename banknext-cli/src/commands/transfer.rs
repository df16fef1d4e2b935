//! Transfer, deposit and withdraw commands

use anyhow::Result;
use colored::Colorize;

use banknext_core::{Transaction, TransferRequest};

use super::{get_context, parse_amount, print_json, with_spinner};
use crate::output::{self, format_amount};

pub fn run_transfer(
    from: &str,
    to: &str,
    amount: &str,
    description: Option<String>,
    json: bool,
) -> Result<()> {
    let amount = parse_amount(amount)?;
    let ctx = get_context()?;
    let request = TransferRequest::transfer(from, to, amount).with_description(description);

    let tx = with_spinner("Sending transfer...", || ctx.transaction_service.transfer(&request))?;
    report(&tx, "Transfer", &ctx.config.default_currency, json)
}

pub fn run_deposit(
    account: &str,
    amount: &str,
    description: Option<String>,
    json: bool,
) -> Result<()> {
    let amount = parse_amount(amount)?;
    let ctx = get_context()?;
    let request = TransferRequest::deposit(account, amount).with_description(description);

    let tx = with_spinner("Depositing...", || ctx.transaction_service.deposit(&request))?;
    report(&tx, "Deposit", &ctx.config.default_currency, json)
}

pub fn run_withdraw(
    account: &str,
    amount: &str,
    description: Option<String>,
    json: bool,
) -> Result<()> {
    let amount = parse_amount(amount)?;
    let ctx = get_context()?;
    let request = TransferRequest::withdrawal(account, amount).with_description(description);

    let tx = with_spinner("Withdrawing...", || ctx.transaction_service.withdraw(&request))?;
    report(&tx, "Withdrawal", &ctx.config.default_currency, json)
}

fn report(tx: &Transaction, label: &str, default_currency: &str, json: bool) -> Result<()> {
    if json {
        return print_json(tx);
    }

    let currency = tx.currency.as_deref().unwrap_or(default_currency);
    output::success(&format!(
        "{} of {} {}",
        label,
        format_amount(tx.amount, currency),
        tx.status.as_str().to_lowercase()
    ));
    println!("  Reference: {}", tx.transaction_reference.bold());
    if let Some(after) = tx.balance_after {
        println!("  Balance:   {}", format_amount(after, currency));
    }
    if let Some(fee) = tx.fee.filter(|f| !f.is_zero()) {
        println!("  Fee:       {}", format_amount(fee, currency));
    }
    Ok(())
}
