//! Dashboard service - balances and recent activity across a customer's accounts

use std::collections::{BTreeMap, HashSet};

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::result::Result;
use crate::domain::{Account, AccountType, Direction, Transaction, TransactionStatus};

use super::accounts::AccountService;
use super::transactions::TransactionService;

/// Days of history counted as income and expenses, today included
pub const WINDOW_DAYS: i64 = 30;

/// Transactions listed under recent activity
pub const RECENT_LIMIT: usize = 5;

/// Everything the dashboard shows. Amounts are grouped by currency.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub accounts: Vec<Account>,
    pub total_balance: BTreeMap<String, Decimal>,
    pub savings: BTreeMap<String, Decimal>,
    pub income: BTreeMap<String, Decimal>,
    pub expenses: BTreeMap<String, Decimal>,
    pub window_start: NaiveDate,
    pub recent: Vec<RecentActivity>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    pub account_number: String,
    pub direction: Direction,
    pub transaction: Transaction,
}

pub struct DashboardService {
    accounts: AccountService,
    transactions: TransactionService,
}

impl DashboardService {
    pub fn new(accounts: AccountService, transactions: TransactionService) -> Self {
        Self {
            accounts,
            transactions,
        }
    }

    /// Load the customer's accounts and each account's history.
    ///
    /// Failing to list accounts fails the dashboard; a history that can't be
    /// fetched becomes a warning and the rest is still summarized.
    pub fn summary(&self, customer_id: &str, today: NaiveDate) -> Result<DashboardSummary> {
        let accounts = self.accounts.list_for_customer(customer_id)?;

        let histories = accounts
            .iter()
            .map(|account| {
                let history = self.transactions.list_for_account(&account.account_number);
                (account.account_number.clone(), history)
            })
            .collect();

        Ok(summarize(accounts, histories, today))
    }
}

/// Combine accounts and their histories into a dashboard.
///
/// A transfer between two of the customer's own accounts shows up in both
/// histories; it is listed once and counted as neither income nor expense.
pub fn summarize(
    accounts: Vec<Account>,
    histories: Vec<(String, Result<Vec<Transaction>>)>,
    today: NaiveDate,
) -> DashboardSummary {
    let window_start = today - Duration::days(WINDOW_DAYS - 1);
    let own: HashSet<String> = accounts.iter().map(|a| a.account_number.clone()).collect();

    let mut total_balance = BTreeMap::new();
    let mut savings = BTreeMap::new();
    for account in &accounts {
        *total_balance
            .entry(account.currency.clone())
            .or_insert(Decimal::ZERO) += account.balance;
        if account.account_type == AccountType::Savings {
            *savings
                .entry(account.currency.clone())
                .or_insert(Decimal::ZERO) += account.balance;
        }
    }

    let mut income = BTreeMap::new();
    let mut expenses = BTreeMap::new();
    let mut warnings = Vec::new();
    let mut seen = HashSet::new();
    let mut recent = Vec::new();

    for (account_number, history) in histories {
        let transactions = match history {
            Ok(transactions) => transactions,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load account history");
                warnings.push(format!(
                    "Failed to fetch transactions for account {}: {}",
                    crate::domain::mask_account_number(&account_number),
                    e
                ));
                continue;
            }
        };

        let account_currency = accounts
            .iter()
            .find(|a| a.account_number == account_number)
            .map(|a| a.currency.clone());

        for tx in transactions {
            if !seen.insert(tx.transaction_reference.clone()) {
                continue;
            }
            let direction = tx.direction_for(&account_number);

            let in_window = tx
                .transaction_date
                .map(|d| d.date() >= window_start && d.date() <= today)
                .unwrap_or(false);

            if in_window && tx.status == TransactionStatus::Completed && !is_internal(&tx, &own) {
                let currency = tx
                    .currency
                    .clone()
                    .or_else(|| account_currency.clone())
                    .unwrap_or_default();
                let bucket = match direction {
                    Direction::Credit => &mut income,
                    Direction::Debit => &mut expenses,
                };
                *bucket.entry(currency).or_insert(Decimal::ZERO) += tx.amount;
            }

            recent.push(RecentActivity {
                account_number: account_number.clone(),
                direction,
                transaction: tx,
            });
        }
    }

    recent.sort_by(|a, b| b.transaction.transaction_date.cmp(&a.transaction.transaction_date));
    recent.truncate(RECENT_LIMIT);

    DashboardSummary {
        accounts,
        total_balance,
        savings,
        income,
        expenses,
        window_start,
        recent,
        warnings,
    }
}

fn is_internal(tx: &Transaction, own: &HashSet<String>) -> bool {
    let from = tx.from_account.as_ref().and_then(|a| a.account_number.as_ref());
    let to = tx
        .to_account
        .as_ref()
        .and_then(|a| a.account_number.as_ref())
        .or(tx.to_account_number.as_ref());

    matches!((from, to), (Some(f), Some(t)) if own.contains(f) && own.contains(t))
}
