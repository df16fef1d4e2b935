//! Transactions service - `/transactions/*`

use std::sync::Arc;

use crate::adapters::http::ApiClient;
use crate::domain::result::Result;
use crate::domain::{Transaction, TransferRequest};

/// Money movement and transaction history bindings
#[derive(Debug, Clone)]
pub struct TransactionService {
    client: Arc<ApiClient>,
}

impl TransactionService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Move money between two accounts
    pub fn transfer(&self, request: &TransferRequest) -> Result<Transaction> {
        self.client.post_json(&["transactions", "transfer"], request)
    }

    /// Credit an account
    pub fn deposit(&self, request: &TransferRequest) -> Result<Transaction> {
        self.client.post_json(&["transactions", "deposit"], request)
    }

    /// Debit an account
    pub fn withdraw(&self, request: &TransferRequest) -> Result<Transaction> {
        self.client.post_json(&["transactions", "withdrawal"], request)
    }

    /// Look up one transaction by its reference
    pub fn get(&self, reference: &str) -> Result<Transaction> {
        self.client.get_json(&["transactions", reference])
    }

    /// Full history of an account, as ordered by the server
    pub fn list_for_account(&self, account_number: &str) -> Result<Vec<Transaction>> {
        self.client
            .get_json(&["transactions", "account", account_number])
    }
}
