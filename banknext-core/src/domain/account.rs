//! Account domain model

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::result::Error;
use super::wire::{
    deserialize_amount, deserialize_optional_amount, deserialize_optional_datetime,
    deserialize_optional_id,
};

/// Product type of a bank account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Savings,
    Current,
    FixedDeposit,
    Salary,
    Islamic,
    #[serde(other)]
    Other,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Savings => "SAVINGS",
            AccountType::Current => "CURRENT",
            AccountType::FixedDeposit => "FIXED_DEPOSIT",
            AccountType::Salary => "SALARY",
            AccountType::Islamic => "ISLAMIC",
            AccountType::Other => "OTHER",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace(['-', ' '], "_").as_str() {
            "SAVINGS" => Ok(AccountType::Savings),
            "CURRENT" => Ok(AccountType::Current),
            "FIXED_DEPOSIT" => Ok(AccountType::FixedDeposit),
            "SALARY" => Ok(AccountType::Salary),
            "ISLAMIC" => Ok(AccountType::Islamic),
            other => Err(format!(
                "Unknown account type '{}'. Expected one of: savings, current, fixed-deposit, salary, islamic",
                other
            )),
        }
    }
}

/// Lifecycle state of a bank account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Inactive,
    Frozen,
    Closed,
    Dormant,
    #[serde(other)]
    Other,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "ACTIVE",
            AccountStatus::Inactive => "INACTIVE",
            AccountStatus::Frozen => "FROZEN",
            AccountStatus::Closed => "CLOSED",
            AccountStatus::Dormant => "DORMANT",
            AccountStatus::Other => "OTHER",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bank account as returned by the accounts API.
///
/// Display-only on the client; every mutation happens on the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    pub account_number: String,
    #[serde(default)]
    pub iban: Option<String>,
    pub account_type: AccountType,
    #[serde(deserialize_with = "deserialize_amount")]
    pub balance: Decimal,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub available_balance: Option<Decimal>,
    pub currency: String,
    pub status: AccountStatus,
    #[serde(default)]
    pub branch_code: Option<String>,
    #[serde(default)]
    pub branch_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub interest_rate: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub overdraft_limit: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub last_transaction_date: Option<NaiveDateTime>,
}

impl Account {
    /// Account number with everything but the last four digits masked
    pub fn masked_number(&self) -> String {
        mask_account_number(&self.account_number)
    }

    pub fn is_frozen(&self) -> bool {
        self.status == AccountStatus::Frozen
    }
}

/// Mask all but the last four characters of an account number
pub fn mask_account_number(number: &str) -> String {
    let chars: Vec<char> = number.chars().collect();
    if chars.len() <= 4 {
        return number.to_string();
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "•".repeat(chars.len() - 4), visible)
}

/// Normalize a customer id for the account endpoints.
///
/// Those endpoints take the numeric database id, not the `CUST…` business
/// id shown in the profile.
pub fn parse_customer_id(raw: &str) -> super::result::Result<String> {
    let trimmed = raw.trim();
    trimmed
        .parse::<u64>()
        .map(|id| id.to_string())
        .map_err(|_| {
            Error::validation(format!(
                "Customer id '{}' is not numeric; pass --customer-id with the numeric id",
                trimmed
            ))
        })
}

/// Body of `POST /accounts/create`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub customer_id: String,
    pub account_type: AccountType,
    pub currency: String,
}

impl CreateAccountRequest {
    /// Currency used by the server when none is given
    pub const DEFAULT_CURRENCY: &'static str = "PKR";

    pub fn new(customer_id: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            customer_id: customer_id.into(),
            account_type,
            currency: Self::DEFAULT_CURRENCY.to_string(),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into().to_uppercase();
        self
    }
}
