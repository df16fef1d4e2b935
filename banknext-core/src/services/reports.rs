//! Reports service - transaction statements as PDF or Excel

use std::sync::Arc;

use crate::adapters::http::ApiClient;
use crate::domain::result::Result;
use crate::domain::{Report, ReportRequest};

#[derive(Debug, Clone)]
pub struct ReportService {
    client: Arc<ApiClient>,
}

impl ReportService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Download a statement for one account over a date range
    pub fn generate(&self, request: &ReportRequest) -> Result<Report> {
        let bytes = self.client.get_bytes(
            &["reports", "transactions", request.format.path_segment()],
            &request.query(),
        )?;
        tracing::debug!(format = %request.format, size = bytes.len(), "report downloaded");

        Ok(Report {
            format: request.format,
            file_name: request.format.default_file_name(),
            bytes,
        })
    }
}
