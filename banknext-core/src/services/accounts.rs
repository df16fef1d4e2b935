//! Accounts service - `/accounts/*`

use std::sync::Arc;

use crate::adapters::http::ApiClient;
use crate::domain::result::Result;
use crate::domain::{Account, CreateAccountRequest};

/// Account bindings
#[derive(Debug, Clone)]
pub struct AccountService {
    client: Arc<ApiClient>,
}

impl AccountService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Open a new account for a customer
    pub fn create(&self, request: &CreateAccountRequest) -> Result<Account> {
        self.client.post_json(&["accounts", "create"], request)
    }

    /// Fetch a single account by number
    pub fn get(&self, account_number: &str) -> Result<Account> {
        self.client.get_json(&["accounts", account_number])
    }

    /// All accounts belonging to a customer
    pub fn list_for_customer(&self, customer_id: &str) -> Result<Vec<Account>> {
        self.client.get_json(&["accounts", "customer", customer_id])
    }

    /// Freeze an account; returns the server's confirmation text
    pub fn freeze(&self, account_number: &str) -> Result<String> {
        self.client.post_empty(&["accounts", account_number, "freeze"])
    }

    /// Lift a freeze; returns the server's confirmation text
    pub fn unfreeze(&self, account_number: &str) -> Result<String> {
        self.client.post_empty(&["accounts", account_number, "unfreeze"])
    }
}
