//! Transactions command - history of an account or one transaction

use anyhow::Result;
use colored::Colorize;
use comfy_table::Cell;

use banknext_core::domain::mask_account_number;
use banknext_core::Transaction;

use super::{get_context, print_json, with_spinner};
use crate::output::{self, format_amount, signed_amount_cell, status_cell};

pub fn run(account: Option<&str>, reference: Option<&str>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let currency = ctx.config.default_currency.clone();

    if let Some(reference) = reference {
        let tx = with_spinner("Looking up transaction...", || {
            ctx.transaction_service.get(reference)
        })?;
        if json {
            return print_json(&tx);
        }
        print_detail(&tx, &currency);
        return Ok(());
    }

    let Some(account) = account else {
        anyhow::bail!("Pass --account or --reference");
    };

    let history = with_spinner("Loading transactions...", || {
        ctx.transaction_service.list_for_account(account)
    })?;

    if json {
        return print_json(&history);
    }

    if history.is_empty() {
        output::info("No transactions found.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Date", "Reference", "Type", "Description", "Amount", "Status"]);
    for tx in &history {
        let date = tx
            .transaction_date
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        let tx_currency = tx.currency.as_deref().unwrap_or(&currency);
        table.add_row(vec![
            Cell::new(date),
            Cell::new(&tx.transaction_reference),
            Cell::new(tx.transaction_type.as_str()),
            Cell::new(tx.description.as_deref().unwrap_or("")),
            signed_amount_cell(tx.amount, tx_currency, tx.direction_for(account)),
            status_cell(tx.status),
        ]);
    }

    println!(
        "{} {}",
        "Transactions for".bold(),
        mask_account_number(account).bold()
    );
    println!("{}", table);
    println!("{} transaction(s)", history.len());
    Ok(())
}

fn print_detail(tx: &Transaction, default_currency: &str) {
    let currency = tx.currency.as_deref().unwrap_or(default_currency);
    let mut table = output::create_table();

    let account_of = |r: &Option<banknext_core::domain::AccountRef>| {
        r.as_ref()
            .and_then(|a| a.account_number.clone())
    };

    table.add_row(vec!["Reference".to_string(), tx.transaction_reference.clone()]);
    table.add_row(vec!["Type".to_string(), tx.transaction_type.to_string()]);
    table.add_row(vec!["Amount".to_string(), format_amount(tx.amount, currency)]);
    table.add_row(vec!["Status".to_string(), tx.status.to_string()]);
    if let Some(channel) = &tx.channel {
        table.add_row(vec!["Channel".to_string(), channel.clone()]);
    }
    if let Some(from) = account_of(&tx.from_account) {
        table.add_row(vec!["From".to_string(), from]);
    }
    if let Some(to) = account_of(&tx.to_account).or_else(|| tx.to_account_number.clone()) {
        table.add_row(vec!["To".to_string(), to]);
    }
    if let Some(description) = &tx.description {
        table.add_row(vec!["Description".to_string(), description.clone()]);
    }
    if let Some(date) = tx.transaction_date {
        table.add_row(vec!["Date".to_string(), date.format("%Y-%m-%d %H:%M:%S").to_string()]);
    }
    if let Some(completed) = tx.completed_date {
        table.add_row(vec!["Completed".to_string(), completed.format("%Y-%m-%d %H:%M:%S").to_string()]);
    }
    for (label, value) in [("Fee", tx.fee), ("Tax", tx.tax), ("Balance after", tx.balance_after)] {
        if let Some(value) = value {
            table.add_row(vec![label.to_string(), format_amount(value, currency)]);
        }
    }

    println!("{}", table);
}
