//! # Lead Check Command
//!
//! File: cli/src/commands/lead/check.rs
//!
//! `softsell lead check` runs the form's validation rules and reports every
//! failing field. Nothing is submitted.
//!
use super::{print_field_errors, LeadFieldArgs};
use crate::common::lead::{validate, LeadFields};
use crate::core::error::{Result, SoftsellError};
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub fields: LeadFieldArgs,
}

pub fn handle_check(args: CheckArgs) -> Result<()> {
    let fields: LeadFields = args.fields.into();
    match validate(&fields) {
        Ok(submission) => {
            info!(email = submission.email(), "Lead details are valid");
            println!("✅ Lead details are valid.");
            Ok(())
        }
        Err(errors) => {
            eprintln!("Please fix the following fields:");
            print_field_errors(&errors);
            Err(SoftsellError::Validation {
                fields: errors.field_list(),
            }
            .into())
        }
    }
}
