//! Bulk account opening types

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Columns the bulk account opening endpoint reads, in order
pub const BULK_OPENING_COLUMNS: [&str; 7] = [
    "firstName",
    "lastName",
    "email",
    "cnic",
    "phoneNumber",
    "dateOfBirth",
    "accountType",
];

/// Response of `POST /csv/bulk-account-opening`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkOpeningResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub customers_created: u64,
    #[serde(default)]
    pub customers: Vec<JsonValue>,
}

/// Local look at a CSV before it is uploaded
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkFilePreview {
    pub columns: Vec<String>,
    pub rows: usize,
    pub missing_columns: Vec<String>,
}

impl BulkFilePreview {
    pub fn looks_valid(&self) -> bool {
        self.rows > 0 && self.missing_columns.is_empty()
    }
}
