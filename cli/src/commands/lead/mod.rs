//! # SoftSell Lead Command Group
//!
//! File: cli/src/commands/lead/mod.rs
//!
//! ## Overview
//!
//! Command-line access to the lead form:
//!
//! ```bash
//! # Validate only; exits non-zero and lists problems when invalid
//! softsell lead check --name Ada --email ada@example.org --message "2 Office seats"
//!
//! # Validate and hand off to the configured intake sink
//! softsell lead submit --name Ada --email ada@example.org --message "2 Office seats"
//!
//! # Same, but drop the lead into a specific outbox directory
//! softsell lead submit --outbox ./outbox --name Ada --email ada@example.org --message "..."
//! ```
//!
use crate::common::lead::{FieldErrors, LeadFields};
use crate::core::config::Config;
use crate::core::error::Result;
use clap::{Args, Parser, Subcommand};

/// Implements `softsell lead check`.
mod check;
/// Implements `softsell lead submit`.
mod submit;

#[derive(Parser, Debug)]
pub struct LeadArgs {
    #[command(subcommand)]
    command: LeadCommand,
}

#[derive(Subcommand, Debug)]
enum LeadCommand {
    /// Validate lead details without submitting them.
    Check(check::CheckArgs),
    /// Validate lead details and submit them to the intake sink.
    Submit(submit::SubmitArgs),
}

/// Form fields shared by `check` and `submit`. Missing flags count as empty.
#[derive(Args, Debug, Clone, Default)]
pub struct LeadFieldArgs {
    /// Contact name.
    #[arg(long, default_value = "")]
    pub name: String,
    /// Contact email address.
    #[arg(long, default_value = "")]
    pub email: String,
    /// Company name (optional).
    #[arg(long, default_value = "")]
    pub company: String,
    /// License details: product, seat count, remaining term.
    #[arg(long, short, default_value = "")]
    pub message: String,
}

impl From<LeadFieldArgs> for LeadFields {
    fn from(args: LeadFieldArgs) -> Self {
        LeadFields {
            name: args.name,
            email: args.email,
            company: args.company,
            message: args.message,
        }
    }
}

/// Prints one line per invalid field to stderr.
fn print_field_errors(errors: &FieldErrors) {
    for (field, message) in errors.iter() {
        eprintln!("  - {}: {}", field, message);
    }
}

/// Dispatches `softsell lead <subcommand>`.
pub async fn handle_lead(args: LeadArgs, config: &Config) -> Result<()> {
    match args.command {
        LeadCommand::Check(args) => check::handle_check(args)?,
        LeadCommand::Submit(args) => submit::handle_submit(args, config).await?,
    }
    Ok(())
}
