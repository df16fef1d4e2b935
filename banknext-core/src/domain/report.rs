//! Transaction report types

use std::fmt;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Output format of a transaction report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Pdf,
    Excel,
}

impl ReportFormat {
    /// Last path segment of the report endpoint
    pub fn path_segment(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Excel => "excel",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Excel => "xlsx",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "application/pdf",
            ReportFormat::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// File name the server suggests for downloads
    pub fn default_file_name(&self) -> String {
        format!("transaction-report.{}", self.extension())
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Ok(ReportFormat::Pdf),
            "excel" | "xlsx" => Ok(ReportFormat::Excel),
            other => Err(format!("Unknown report format '{}'. Use pdf or excel", other)),
        }
    }
}

/// Parameters of a report request: one account over a date range.
///
/// The server expects ISO date-times; the range covers `start` from midnight
/// through the last second of `end`.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub account_id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub format: ReportFormat,
}

impl ReportRequest {
    pub fn start_datetime(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    pub fn end_datetime(&self) -> NaiveDateTime {
        self.end
            .and_hms_opt(23, 59, 59)
            .unwrap_or_else(|| self.end.and_time(NaiveTime::MIN))
    }

    /// Query parameters in the order the server documents them
    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("accountId", self.account_id.clone()),
            ("startDate", self.start_datetime().format("%Y-%m-%dT%H:%M:%S").to_string()),
            ("endDate", self.end_datetime().format("%Y-%m-%dT%H:%M:%S").to_string()),
        ]
    }
}

/// A downloaded report
#[derive(Debug, Clone)]
pub struct Report {
    pub format: ReportFormat,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Report {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Write the report to `path`
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, &self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_covers_whole_days() {
        let request = ReportRequest {
            account_id: "12".to_string(),
            start: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 10, 31).unwrap(),
            format: ReportFormat::Pdf,
        };
        let query = request.query();
        assert_eq!(query[0], ("accountId", "12".to_string()));
        assert_eq!(query[1], ("startDate", "2025-10-01T00:00:00".to_string()));
        assert_eq!(query[2], ("endDate", "2025-10-31T23:59:59".to_string()));
    }

    #[test]
    fn test_format_parsing_and_names() {
        assert_eq!("XLSX".parse::<ReportFormat>().unwrap(), ReportFormat::Excel);
        assert!("csv".parse::<ReportFormat>().is_err());
        assert_eq!(ReportFormat::Excel.default_file_name(), "transaction-report.xlsx");
        assert_eq!(ReportFormat::Pdf.content_type(), "application/pdf");
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/oct.pdf");
        let report = Report {
            format: ReportFormat::Pdf,
            file_name: "transaction-report.pdf".to_string(),
            bytes: b"%PDF-1.7".to_vec(),
        };
        report.save(&path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.7");
        assert_eq!(report.size(), 8);
    }
}
