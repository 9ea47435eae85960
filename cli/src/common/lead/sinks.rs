//! # Lead Intake Collaborators
//!
//! File: cli/src/common/lead/sinks.rs
//!
//! ## Overview
//!
//! The lead form hands validated submissions to a `LeadSubmitter`. Transport,
//! retries and storage are the submitter's business; the form only looks at
//! success versus failure.
//!
//! Available submitters:
//! - `LogSubmitter`: records the lead in the log and reports success (dry run).
//! - `OutboxSubmitter`: writes each lead as `lead-<uuid>.json` into a directory
//!   watched by a downstream mailer.
//!
//! `create_submitter` picks one from the `[lead]` config section.
//!
use super::validate::LeadSubmission;
use crate::common::fs::io;
use crate::core::config::{LeadConfig, SinkKind};
use crate::core::error::{Result, SoftsellError};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

/// Failure reported by a submitter. The form never inspects the reason.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct SubmissionError(String);

impl SubmissionError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

#[async_trait]
pub trait LeadSubmitter: Send + Sync {
    /// Hands one validated lead to the intake backend.
    async fn submit_lead(
        &self,
        submission: &LeadSubmission,
    ) -> std::result::Result<(), SubmissionError>;
}

/// Builds the submitter selected by `config`.
pub fn create_submitter(config: &LeadConfig) -> Result<Arc<dyn LeadSubmitter>> {
    match config.sink {
        SinkKind::Log => Ok(Arc::new(LogSubmitter)),
        SinkKind::Outbox => {
            let dir = config.outbox_dir.as_deref().ok_or_else(|| {
                SoftsellError::Config(
                    "lead.outbox_dir is required when lead.sink = \"outbox\".".to_string(),
                )
            })?;
            Ok(Arc::new(OutboxSubmitter::new(dir)))
        }
    }
}

/// Accepts every lead and only logs it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSubmitter;

#[async_trait]
impl LeadSubmitter for LogSubmitter {
    async fn submit_lead(
        &self,
        submission: &LeadSubmission,
    ) -> std::result::Result<(), SubmissionError> {
        info!(
            name = submission.name(),
            email = submission.email(),
            company = submission.company().unwrap_or("-"),
            "Lead received (log sink, not forwarded)"
        );
        debug!(message = submission.message(), "Lead details");
        Ok(())
    }
}

/// Drops leads as JSON files into a directory.
#[derive(Debug, Clone)]
pub struct OutboxSubmitter {
    dir: PathBuf,
}

impl OutboxSubmitter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl LeadSubmitter for OutboxSubmitter {
    async fn submit_lead(
        &self,
        submission: &LeadSubmission,
    ) -> std::result::Result<(), SubmissionError> {
        let body = serde_json::to_string_pretty(submission)
            .map_err(|e| SubmissionError::new(format!("could not encode lead: {}", e)))?;
        let path = self.dir.join(format!("lead-{}.json", Uuid::new_v4()));

        let target = path.clone();
        tokio::task::spawn_blocking(move || io::write_string_to_file(&target, &body))
            .await
            .map_err(|e| SubmissionError::new(format!("outbox writer panicked: {}", e)))?
            .map_err(|e| SubmissionError::new(format!("{:#}", e)))?;

        info!(path = %path.display(), "Lead written to outbox");
        Ok(())
    }
}
