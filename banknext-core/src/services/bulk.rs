//! Bulk account opening from a CSV upload

use std::path::Path;
use std::sync::Arc;

use reqwest::blocking::multipart::{Form, Part};

use crate::adapters::http::ApiClient;
use crate::domain::bulk::BULK_OPENING_COLUMNS;
use crate::domain::result::{Error, Result};
use crate::domain::{BulkFilePreview, BulkOpeningResult};

/// Bulk account opening service
#[derive(Debug, Clone)]
pub struct BulkOpeningService {
    client: Arc<ApiClient>,
}

impl BulkOpeningService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Read the header and count rows without uploading anything.
    ///
    /// Missing columns are reported, not rejected; the server has the
    /// final say on what it accepts.
    pub fn inspect(&self, file_path: &Path) -> Result<BulkFilePreview> {
        let mut reader = csv::Reader::from_path(file_path)
            .map_err(|e| Error::validation(format!("Failed to read CSV file: {}", e)))?;

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| Error::validation(format!("Failed to read CSV header: {}", e)))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = 0;
        for record in reader.records() {
            let record = record
                .map_err(|e| Error::validation(format!("Malformed CSV row {}: {}", rows + 1, e)))?;
            if record.iter().any(|field| !field.trim().is_empty()) {
                rows += 1;
            }
        }

        let missing_columns = BULK_OPENING_COLUMNS
            .iter()
            .filter(|expected| !columns.iter().any(|c| c.eq_ignore_ascii_case(expected)))
            .map(|c| c.to_string())
            .collect();

        Ok(BulkFilePreview {
            columns,
            rows,
            missing_columns,
        })
    }

    /// Upload the file as multipart field `file`
    pub fn submit(&self, file_path: &Path) -> Result<BulkOpeningResult> {
        let bytes = std::fs::read(file_path)?;
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "accounts.csv".to_string());

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("text/csv")
            .map_err(|e| Error::Transport(format!("Failed to build upload: {}", e)))?;
        let form = Form::new().part("file", part);

        let result: BulkOpeningResult = self
            .client
            .post_multipart(&["csv", "bulk-account-opening"], form)?;
        tracing::debug!(created = result.customers_created, "bulk account opening finished");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::bank_mock::{MockBankServer, MockConfig};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const GOOD_CSV: &str = "firstName,lastName,email,cnic,phoneNumber,dateOfBirth,accountType\n\
        Ayesha,Malik,ayesha@bank.test,35202-1234567-1,+923001234567,1994-03-12,SAVINGS\n\
        Bilal,Khan,bilal@bank.test,35202-7654321-3,+923111234567,1990-01-05,CURRENT\n";

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_inspect_good_file() {
        let server = MockBankServer::start(MockConfig::default()).unwrap();
        let service = BulkOpeningService::new(server.client());
        let file = csv_file(GOOD_CSV);

        let preview = service.inspect(file.path()).unwrap();
        assert_eq!(preview.rows, 2);
        assert!(preview.missing_columns.is_empty());
        assert!(preview.looks_valid());
        assert!(server.requests().is_empty());
    }

    #[test]
    fn test_inspect_reports_missing_columns() {
        let server = MockBankServer::start(MockConfig::default()).unwrap();
        let service = BulkOpeningService::new(server.client());
        let file = csv_file("firstName,lastName,email\nA,B,a@bank.test\n,,\n");

        let preview = service.inspect(file.path()).unwrap();
        assert_eq!(preview.rows, 1);
        assert_eq!(
            preview.missing_columns,
            vec!["cnic", "phoneNumber", "dateOfBirth", "accountType"]
        );
        assert!(!preview.looks_valid());
    }

    #[test]
    fn test_inspect_ignores_header_case() {
        let server = MockBankServer::start(MockConfig::default()).unwrap();
        let service = BulkOpeningService::new(server.client());
        let file = csv_file(
            "FirstName,LASTNAME,Email,CNIC,PhoneNumber,DateOfBirth,accounttype\n\
             A,B,a@bank.test,35202-1234567-1,+923001234567,1994-03-12,SAVINGS\n",
        );

        let preview = service.inspect(file.path()).unwrap();
        assert_eq!(preview.rows, 1);
        assert!(preview.missing_columns.is_empty());
        assert_eq!(preview.columns[0], "FirstName");
    }

    #[test]
    fn test_submit_uploads_multipart_file() {
        let server = MockBankServer::start(MockConfig::default()).unwrap();
        let service = BulkOpeningService::new(server.client());
        let file = csv_file(GOOD_CSV);

        let result = service.submit(file.path()).unwrap();
        assert!(result.success);
        assert_eq!(result.customers_created, 2);

        let request = server.last_request().unwrap();
        assert_eq!(request.path, "/api/csv/bulk-account-opening");
        assert!(request
            .header("content-type")
            .unwrap()
            .starts_with("multipart/form-data"));
        assert_eq!(request.header("authorization"), Some("Bearer abc123"));
    }

    #[test]
    fn test_submit_missing_file() {
        let server = MockBankServer::start(MockConfig::default()).unwrap();
        let service = BulkOpeningService::new(server.client());

        let err = service.submit(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(server.requests().is_empty());
    }
}
