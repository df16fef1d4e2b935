//! Login, register, logout and whoami

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use colored::Colorize;
use dialoguer::{Input, Password};

use banknext_core::RegisterRequest;

use super::{get_context, print_json, with_spinner};
use crate::output;

pub fn run_login(email: Option<String>, password: Option<String>) -> Result<()> {
    let ctx = get_context()?;

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = match password {
        Some(p) => p,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let result = with_spinner("Signing in...", || ctx.session.login(&email, &password));

    match (result.success, result.data) {
        (true, Some(profile)) => {
            let name = profile.display_name().unwrap_or(email);
            output::success(&format!("Welcome back, {}!", name));
            Ok(())
        }
        _ => anyhow::bail!(result.error.unwrap_or_else(|| "Login failed".to_string())),
    }
}

#[derive(Args)]
pub struct RegisterArgs {
    /// First name
    #[arg(long)]
    first_name: Option<String>,
    /// Last name
    #[arg(long)]
    last_name: Option<String>,
    /// Email address
    #[arg(long)]
    email: Option<String>,
    /// National identity number (CNIC)
    #[arg(long)]
    cnic: Option<String>,
    /// Phone number
    #[arg(long)]
    phone: Option<String>,
    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    date_of_birth: Option<String>,
    /// Password (prompted with confirmation if omitted)
    #[arg(long, env = "BANKNEXT_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

fn field(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::new().with_prompt(prompt).interact_text()?),
    }
}

pub fn run_register(args: RegisterArgs) -> Result<()> {
    let ctx = get_context()?;

    let first_name = field(args.first_name, "First name")?;
    let last_name = field(args.last_name, "Last name")?;
    let email = field(args.email, "Email")?;
    let cnic = field(args.cnic, "CNIC")?;
    let phone_number = field(args.phone, "Phone number")?;
    let date_of_birth = field(args.date_of_birth, "Date of birth (YYYY-MM-DD)")?;
    let date_of_birth = NaiveDate::parse_from_str(date_of_birth.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date of birth: '{}'", date_of_birth))?;

    let password = match args.password {
        Some(p) => p,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?,
    };

    let request = RegisterRequest {
        first_name,
        last_name,
        email,
        cnic,
        phone_number,
        date_of_birth,
        password,
    };

    let result = with_spinner("Creating your profile...", || ctx.session.register(&request));
    if !result.success {
        anyhow::bail!(result
            .error
            .unwrap_or_else(|| "Registration failed".to_string()));
    }

    output::success("Registration complete. You are now logged in.");
    if let Some(profile) = result.data {
        if let Some(number) = &profile.account_number {
            println!("  Account: {}", number);
        }
        if let Some(iban) = &profile.iban {
            println!("  IBAN:    {}", iban);
        }
    }
    Ok(())
}

pub fn run_logout() -> Result<()> {
    let ctx = get_context()?;
    if !ctx.session.handle().is_authenticated() {
        output::info("Not logged in.");
        return Ok(());
    }
    ctx.session.logout()?;
    output::success("Logged out.");
    Ok(())
}

pub fn run_whoami(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let state = ctx.require_session()?;

    if json {
        return print_json(&serde_json::json!({
            "authenticated": true,
            "profile": state.profile,
        }));
    }

    let Some(profile) = state.profile else {
        output::warning("Logged in, but no profile details are saved. Log in again to refresh them.");
        return Ok(());
    };

    let mut table = output::create_table();
    let name = profile.display_name().unwrap_or_else(|| "-".to_string());
    table.add_row(vec!["Name".to_string(), name]);
    for (label, value) in [
        ("Email", &profile.email),
        ("Customer ID", &profile.customer_id),
        ("Account", &profile.account_number),
        ("IBAN", &profile.iban),
    ] {
        if let Some(value) = value {
            table.add_row(vec![label.to_string(), value.clone()]);
        }
    }

    println!("{}", "Signed in".bold());
    println!("{}", table);
    println!("API: {}", ctx.config.api_base_url.dimmed());
    Ok(())
}
