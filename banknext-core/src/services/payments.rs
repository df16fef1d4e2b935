//! Interbank (IBFT) and Raast instant payments
//!
//! Responses are returned as raw JSON until the backend publishes a
//! contract for these rails.

use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::adapters::http::ApiClient;
use crate::domain::result::Result;
use crate::domain::{IbftTransferRequest, RaastTransferRequest};

#[derive(Debug, Clone)]
pub struct PaymentService {
    client: Arc<ApiClient>,
}

impl PaymentService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// `POST /ibft/transfer`
    pub fn ibft(&self, request: &IbftTransferRequest) -> Result<JsonValue> {
        self.client.post_json(&["ibft", "transfer"], request)
    }

    /// `POST /raast/transfer`
    pub fn raast(&self, request: &RaastTransferRequest) -> Result<JsonValue> {
        self.client.post_json(&["raast", "transfer"], request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::bank_mock::{MockBankServer, MockConfig};
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;

    #[test]
    fn test_ibft_passes_response_through() {
        let server = MockBankServer::start(MockConfig::default()).unwrap();
        let service = PaymentService::new(server.client());

        let response = service
            .ibft(&IbftTransferRequest {
                from_account_number: "1111".to_string(),
                to_account_number: "9999".to_string(),
                to_bank_code: "HBL".to_string(),
                to_bank_name: Some("Habib Bank".to_string()),
                amount: Decimal::new(500, 0),
                description: None,
                extra: BTreeMap::new(),
            })
            .unwrap();

        assert_eq!(response["ibftReference"], "IBFT123");
        assert_eq!(response["toBankCode"], "HBL");
        assert_eq!(server.last_request().unwrap().path, "/api/ibft/transfer");
    }

    #[test]
    fn test_raast_request() {
        let server = MockBankServer::start(MockConfig::default()).unwrap();
        let service = PaymentService::new(server.client());

        let response = service
            .raast(&RaastTransferRequest {
                from_account_number: "1111".to_string(),
                to_iban: Some("PK36SCBL0000001123456702".to_string()),
                raast_id: None,
                amount: Decimal::new(1200, 0),
                description: Some("Fees".to_string()),
                extra: BTreeMap::new(),
            })
            .unwrap();

        assert_eq!(response["status"], "ACCEPTED");
        let body = server.last_request().unwrap().json();
        assert_eq!(body["toIban"], "PK36SCBL0000001123456702");
        assert_eq!(
            server.last_request().unwrap().header("authorization"),
            Some("Bearer abc123")
        );
    }
}
