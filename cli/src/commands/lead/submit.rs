//! # Lead Submit Command
//!
//! File: cli/src/commands/lead/submit.rs
//!
//! `softsell lead submit` fills a `LeadForm` from the flags and submits it once.
//! Notifications go to the console. The exit status is non-zero unless the
//! intake sink accepted the lead.
//!
use super::{print_field_errors, LeadFieldArgs};
use crate::common::lead::sinks::OutboxSubmitter;
use crate::common::lead::{create_submitter, LeadForm, LeadSubmitter, SubmitOutcome};
use crate::common::notify::ConsoleNotifier;
use crate::core::config::Config;
use crate::core::error::{Result, SoftsellError};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

#[derive(Parser, Debug)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub fields: LeadFieldArgs,

    /// Write the lead into this outbox directory, ignoring the configured sink.
    #[arg(long, value_name = "DIR")]
    pub outbox: Option<PathBuf>,
}

pub async fn handle_submit(args: SubmitArgs, config: &Config) -> Result<()> {
    let submitter: Arc<dyn LeadSubmitter> = match args.outbox {
        Some(dir) => {
            debug!("Using outbox override: {}", dir.display());
            Arc::new(OutboxSubmitter::new(dir))
        }
        None => create_submitter(&config.lead)?,
    };

    let form = LeadForm::new(submitter, Arc::new(ConsoleNotifier));
    form.set_fields(args.fields.into())?;

    let outcome = form.submit().await;
    debug!(
        state = ?form.state(),
        trail = ?form.last_trail(),
        "Lead form attempt finished"
    );

    match outcome {
        SubmitOutcome::Submitted => Ok(()),
        SubmitOutcome::Invalid(errors) => {
            eprintln!("Please fix the following fields:");
            print_field_errors(&errors);
            Err(SoftsellError::Validation {
                fields: errors.field_list(),
            }
            .into())
        }
        SubmitOutcome::Failed => Err(SoftsellError::Submission(
            "the intake sink did not accept the lead".to_string(),
        )
        .into()),
        SubmitOutcome::Busy => Err(SoftsellError::Busy.into()),
    }
}
