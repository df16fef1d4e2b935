//! Bulk account opening command

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use super::{get_context, print_json, with_spinner};
use crate::output;

pub fn run(file: &Path, preview: bool, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let inspection = ctx.bulk_service.inspect(file)?;

    if preview {
        if json {
            return print_json(&inspection);
        }
        println!("{}", "CSV preview".bold());
        println!("  Columns: {}", inspection.columns.join(", "));
        println!("  Rows:    {}", inspection.rows);
        if inspection.missing_columns.is_empty() {
            output::success("All expected columns are present.");
        } else {
            output::warning(&format!(
                "Missing columns: {}",
                inspection.missing_columns.join(", ")
            ));
        }
        return Ok(());
    }

    if !json {
        if !inspection.missing_columns.is_empty() {
            output::warning(&format!(
                "Missing columns: {}. The server may reject some rows.",
                inspection.missing_columns.join(", ")
            ));
        }
        if inspection.rows == 0 {
            output::warning("The file has no data rows.");
        }
    }

    let result = with_spinner("Uploading accounts...", || ctx.bulk_service.submit(file))?;

    if json {
        return print_json(&result);
    }

    if result.success {
        output::success(&format!("Created {} customer(s)", result.customers_created));
    } else {
        output::warning("The server did not report success. Check the uploaded file.");
    }

    if !result.customers.is_empty() {
        let mut table = output::create_table();
        table.set_header(vec!["Customer ID", "Name", "Email"]);
        for customer in &result.customers {
            let text = |key: &str| {
                customer
                    .get(key)
                    .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                    .unwrap_or_default()
            };
            let name = format!("{} {}", text("firstName"), text("lastName"));
            table.add_row(vec![text("customerId"), name.trim().to_string(), text("email")]);
        }
        println!("{}", table);
    }
    Ok(())
}
