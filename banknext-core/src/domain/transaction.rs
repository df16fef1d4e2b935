//! Transaction domain model

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::wire::{
    deserialize_amount, deserialize_optional_amount, deserialize_optional_datetime,
    deserialize_optional_id,
};

/// What kind of movement a transaction records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Transfer,
    Ibft,
    Raast,
    AtmWithdrawal,
    AtmDeposit,
    PosPurchase,
    CardPayment,
    BillPayment,
    SalaryCredit,
    InterestCredit,
    FeeDebit,
    Reversal,
    #[serde(other)]
    Other,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "DEPOSIT",
            TransactionType::Withdrawal => "WITHDRAWAL",
            TransactionType::Transfer => "TRANSFER",
            TransactionType::Ibft => "IBFT",
            TransactionType::Raast => "RAAST",
            TransactionType::AtmWithdrawal => "ATM_WITHDRAWAL",
            TransactionType::AtmDeposit => "ATM_DEPOSIT",
            TransactionType::PosPurchase => "POS_PURCHASE",
            TransactionType::CardPayment => "CARD_PAYMENT",
            TransactionType::BillPayment => "BILL_PAYMENT",
            TransactionType::SalaryCredit => "SALARY_CREDIT",
            TransactionType::InterestCredit => "INTEREST_CREDIT",
            TransactionType::FeeDebit => "FEE_DEBIT",
            TransactionType::Reversal => "REVERSAL",
            TransactionType::Other => "OTHER",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Reversed,
    Cancelled,
    Timeout,
    #[serde(other)]
    Other,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Processing => "PROCESSING",
            TransactionStatus::Completed => "COMPLETED",
            TransactionStatus::Failed => "FAILED",
            TransactionStatus::Reversed => "REVERSED",
            TransactionStatus::Cancelled => "CANCELLED",
            TransactionStatus::Timeout => "TIMEOUT",
            TransactionStatus::Other => "OTHER",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether money moved into or out of a given account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Credit,
    Debit,
}

/// Counterparty account reference as embedded by the server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRef {
    #[serde(default)]
    pub account_number: Option<String>,
}

/// A posted or pending transaction. Read-only on the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    pub transaction_reference: String,
    pub transaction_type: TransactionType,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: Decimal,
    #[serde(default)]
    pub currency: Option<String>,
    pub status: TransactionStatus,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub transaction_date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub completed_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub from_account: Option<AccountRef>,
    #[serde(default)]
    pub to_account: Option<AccountRef>,
    #[serde(default)]
    pub to_account_number: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub fee: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub tax: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub balance_before: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub balance_after: Option<Decimal>,
}

impl Transaction {
    fn source_number(&self) -> Option<&str> {
        self.from_account
            .as_ref()
            .and_then(|a| a.account_number.as_deref())
    }

    /// Direction of this transaction as seen from `account_number`.
    ///
    /// Uses the embedded counterparties when the server includes them and
    /// falls back to the transaction type otherwise.
    pub fn direction_for(&self, account_number: &str) -> Direction {
        if let Some(from) = self.source_number() {
            return if from == account_number {
                Direction::Debit
            } else {
                Direction::Credit
            };
        }
        self.direction()
    }

    /// Direction implied by the transaction type alone
    pub fn direction(&self) -> Direction {
        match self.transaction_type {
            TransactionType::Deposit
            | TransactionType::AtmDeposit
            | TransactionType::SalaryCredit
            | TransactionType::InterestCredit
            | TransactionType::Reversal => Direction::Credit,
            _ => Direction::Debit,
        }
    }
}

/// Body shared by transfer, deposit and withdrawal
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_account_number: Option<String>,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TransferRequest {
    /// Move money between two accounts
    pub fn transfer(from: impl Into<String>, to: impl Into<String>, amount: Decimal) -> Self {
        Self {
            from_account_number: Some(from.into()),
            to_account_number: Some(to.into()),
            amount,
            description: None,
        }
    }

    /// Credit an account
    pub fn deposit(to: impl Into<String>, amount: Decimal) -> Self {
        Self {
            to_account_number: Some(to.into()),
            amount,
            ..Default::default()
        }
    }

    /// Debit an account
    pub fn withdrawal(from: impl Into<String>, amount: Decimal) -> Self {
        Self {
            from_account_number: Some(from.into()),
            amount,
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.trim().is_empty());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(json: &str) -> Transaction {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_transaction_from_server_json() {
        let tx = sample(
            r#"{
                "id": 9,
                "transactionReference": "TXN001",
                "transactionType": "TRANSFER",
                "amount": 5000,
                "currency": "PKR",
                "status": "COMPLETED",
                "channel": "INTERNET",
                "transactionDate": "2025-10-25T14:30:00",
                "fromAccount": {"accountNumber": "111"},
                "toAccount": {"accountNumber": "222"}
            }"#,
        );
        assert_eq!(tx.transaction_reference, "TXN001");
        assert_eq!(tx.transaction_type, TransactionType::Transfer);
        assert_eq!(tx.status, TransactionStatus::Completed);
        assert_eq!(tx.amount, Decimal::new(5000, 0));
        assert_eq!(tx.direction_for("111"), Direction::Debit);
        assert_eq!(tx.direction_for("222"), Direction::Credit);
    }

    #[test]
    fn test_direction_falls_back_to_type() {
        let tx = sample(
            r#"{"transactionReference":"TXN002","transactionType":"DEPOSIT","amount":"10000","status":"COMPLETED"}"#,
        );
        assert_eq!(tx.direction_for("anything"), Direction::Credit);

        let tx = sample(
            r#"{"transactionReference":"TXN004","transactionType":"IBFT","amount":15000,"status":"PENDING"}"#,
        );
        assert_eq!(tx.direction(), Direction::Debit);
    }

    #[test]
    fn test_transfer_request_shapes() {
        let transfer = TransferRequest::transfer("111", "222", Decimal::new(2500, 2))
            .with_description(Some("Rent".to_string()));
        assert_eq!(
            serde_json::to_value(&transfer).unwrap(),
            serde_json::json!({
                "fromAccountNumber": "111",
                "toAccountNumber": "222",
                "amount": "25.00",
                "description": "Rent"
            })
        );

        let deposit = TransferRequest::deposit("222", Decimal::new(100, 0))
            .with_description(Some("  ".to_string()));
        let value = serde_json::to_value(&deposit).unwrap();
        assert!(value.get("fromAccountNumber").is_none());
        assert!(value.get("description").is_none());
    }
}
