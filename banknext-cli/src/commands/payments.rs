//! IBFT and Raast commands
//!
//! The server's reply is shown as-is.

use std::collections::BTreeMap;

use anyhow::Result;
use clap::Args;

use banknext_core::domain::{IbftTransferRequest, RaastTransferRequest};

use super::{get_context, parse_amount, print_json, with_spinner};
use crate::output;

#[derive(Args)]
pub struct IbftArgs {
    /// Source account number
    #[arg(long)]
    from: String,
    /// Beneficiary account number at the other bank
    #[arg(long)]
    to: String,
    /// Beneficiary bank code
    #[arg(long)]
    bank_code: String,
    /// Beneficiary bank name
    #[arg(long)]
    bank_name: Option<String>,
    /// Amount to send
    #[arg(long)]
    amount: String,
    /// Description
    #[arg(long)]
    description: Option<String>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct RaastArgs {
    /// Source account number
    #[arg(long)]
    from: String,
    /// Beneficiary IBAN
    #[arg(long, required_unless_present = "raast_id")]
    to_iban: Option<String>,
    /// Beneficiary Raast ID (e.g. mobile number)
    #[arg(long)]
    raast_id: Option<String>,
    /// Amount to send
    #[arg(long)]
    amount: String,
    /// Description
    #[arg(long)]
    description: Option<String>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run_ibft(args: IbftArgs) -> Result<()> {
    let amount = parse_amount(&args.amount)?;
    let ctx = get_context()?;

    let request = IbftTransferRequest {
        from_account_number: args.from,
        to_account_number: args.to,
        to_bank_code: args.bank_code,
        to_bank_name: args.bank_name,
        amount,
        description: args.description,
        extra: BTreeMap::new(),
    };

    let response = with_spinner("Sending interbank transfer...", || {
        ctx.payment_service.ibft(&request)
    })?;

    if !args.json {
        output::success("Interbank transfer submitted");
    }
    print_json(&response)
}

pub fn run_raast(args: RaastArgs) -> Result<()> {
    let amount = parse_amount(&args.amount)?;
    let ctx = get_context()?;

    let request = RaastTransferRequest {
        from_account_number: args.from,
        to_iban: args.to_iban,
        raast_id: args.raast_id,
        amount,
        description: args.description,
        extra: BTreeMap::new(),
    };

    let response = with_spinner("Sending Raast payment...", || ctx.payment_service.raast(&request))?;

    if !args.json {
        output::success("Raast payment submitted");
    }
    print_json(&response)
}
