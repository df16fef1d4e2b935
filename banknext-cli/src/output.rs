//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use rust_decimal::Decimal;

use banknext_core::domain::{Direction, TransactionStatus};

/// Shown in place of a hidden balance
pub const HIDDEN_BALANCE: &str = "••••••";

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// `PKR 125,430.50`
pub fn format_amount(amount: Decimal, currency: &str) -> String {
    let fixed = format!("{:.2}", amount.round_dp(2).abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    if currency.is_empty() {
        format!("{}{}.{}", sign, grouped, fraction)
    } else {
        format!("{} {}{}.{}", currency, sign, grouped, fraction)
    }
}

/// Amount cell, green for money in and red for money out
pub fn signed_amount_cell(amount: Decimal, currency: &str, direction: Direction) -> Cell {
    match direction {
        Direction::Credit => Cell::new(format!("+{}", format_amount(amount, currency))).fg(Color::Green),
        Direction::Debit => Cell::new(format!("-{}", format_amount(amount, currency))).fg(Color::Red),
    }
}

pub fn status_cell(status: TransactionStatus) -> Cell {
    let color = match status {
        TransactionStatus::Completed => Color::Green,
        TransactionStatus::Pending | TransactionStatus::Processing => Color::Yellow,
        TransactionStatus::Other => Color::Grey,
        _ => Color::Red,
    };
    Cell::new(status.as_str()).fg(color)
}
