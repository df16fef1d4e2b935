//! Report command - download a transaction statement

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;

use banknext_core::domain::ReportRequest;
use banknext_core::ReportFormat;

use super::{get_context, print_json, with_spinner};
use crate::output::{self, format_size};

fn parse_date(raw: &str, flag: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid {} date '{}', expected YYYY-MM-DD", flag, raw))
}

pub fn run(
    account_id: &str,
    from: &str,
    to: &str,
    format: &str,
    output_path: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let format: ReportFormat = format.parse().map_err(|e: String| anyhow!(e))?;
    let start = parse_date(from, "--from")?;
    let end = parse_date(to, "--to")?;
    if end < start {
        anyhow::bail!("--to ({}) is before --from ({})", end, start);
    }

    let ctx = get_context()?;
    let request = ReportRequest {
        account_id: account_id.to_string(),
        start,
        end,
        format,
    };

    let report = with_spinner("Generating report...", || ctx.report_service.generate(&request))?;

    let path = output_path.unwrap_or_else(|| PathBuf::from(&report.file_name));
    report
        .save(&path)
        .with_context(|| format!("Failed to save report to {}", path.display()))?;

    if json {
        return print_json(&serde_json::json!({
            "path": path,
            "format": report.format,
            "contentType": report.format.content_type(),
            "size": report.size(),
        }));
    }

    output::success(&format!(
        "Saved {} report to {} ({})",
        report.format,
        path.display(),
        format_size(report.size())
    ));
    Ok(())
}
