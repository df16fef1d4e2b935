//! Dashboard command - balances, 30-day income and expenses, recent activity

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use comfy_table::Cell;
use rust_decimal::Decimal;

use banknext_core::domain::mask_account_number;

use super::{get_context, print_json, with_spinner};
use crate::output::{self, format_amount, signed_amount_cell, status_cell};

fn totals(amounts: &BTreeMap<String, Decimal>) -> String {
    if amounts.is_empty() {
        return format_amount(Decimal::ZERO, "");
    }
    amounts
        .iter()
        .map(|(currency, amount)| format_amount(*amount, currency))
        .collect::<Vec<_>>()
        .join(" + ")
}

pub fn run(customer_id: Option<&str>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let customer_id = ctx.customer_id(customer_id)?;
    let today = Local::now().date_naive();

    let summary = with_spinner("Loading your dashboard...", || {
        ctx.dashboard_service.summary(&customer_id, today)
    })?;

    if json {
        return print_json(&summary);
    }

    let greeting = ctx
        .session
        .handle()
        .profile()
        .and_then(|p| p.first_name)
        .map(|name| format!("Welcome back, {}!", name))
        .unwrap_or_else(|| "Welcome back!".to_string());
    println!("{}", greeting.bold());
    println!();

    let mut stats = output::create_table();
    stats.add_row(vec!["Total balance".to_string(), totals(&summary.total_balance)]);
    stats.add_row(vec!["Savings".to_string(), totals(&summary.savings)]);
    stats.add_row(vec![
        format!("Income since {}", summary.window_start),
        totals(&summary.income),
    ]);
    stats.add_row(vec![
        format!("Expenses since {}", summary.window_start),
        totals(&summary.expenses),
    ]);
    stats.add_row(vec!["Accounts".to_string(), summary.accounts.len().to_string()]);
    println!("{}", stats);

    if !summary.recent.is_empty() {
        println!();
        println!("{}", "Recent transactions".bold());
        let mut table = output::create_table();
        table.set_header(vec!["Date", "Account", "Description", "Amount", "Status"]);
        for item in &summary.recent {
            let tx = &item.transaction;
            let date = tx
                .transaction_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string());
            let description = tx
                .description
                .clone()
                .unwrap_or_else(|| tx.transaction_type.to_string());
            let currency = tx
                .currency
                .as_deref()
                .unwrap_or(&ctx.config.default_currency);
            table.add_row(vec![
                Cell::new(date),
                Cell::new(mask_account_number(&item.account_number)),
                Cell::new(description),
                signed_amount_cell(tx.amount, currency, item.direction),
                status_cell(tx.status),
            ]);
        }
        println!("{}", table);
    }

    for warning in &summary.warnings {
        output::warning(warning);
    }
    Ok(())
}
