//! Interbank (IBFT) and instant-payment (Raast) transfer payloads
//!
//! The server side of these rails has no published contract yet, so the
//! requests carry the fields the transfer form collects plus free-form
//! extras, and the responses are kept as raw JSON.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Body of `POST /ibft/transfer`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IbftTransferRequest {
    pub from_account_number: String,
    pub to_account_number: String,
    pub to_bank_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_bank_name: Option<String>,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, JsonValue>,
}

/// Body of `POST /raast/transfer`.
///
/// Raast addresses the beneficiary by IBAN or by a registered alias such as
/// a mobile number.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaastTransferRequest {
    pub from_account_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_iban: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raast_id: Option<String>,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, JsonValue>,
}
