//! # SoftSell Lead Form Logic (`common::lead`)
//!
//! File: cli/src/common/lead/mod.rs
//!
//! ## Overview
//!
//! The "sell your license" contact form without its markup:
//!
//! - **`validate`**: `LeadFields` in, `LeadSubmission` or `FieldErrors` out.
//! - **`form`**: `LeadForm`, the submit state machine with its single in-flight guard.
//! - **`sinks`**: the `LeadSubmitter` collaborator trait and its adapters.
//!
//! ```rust
//! let form = LeadForm::new(create_submitter(&cfg.lead)?, Arc::new(ConsoleNotifier));
//! form.set_fields(fields)?;
//! match form.submit().await {
//!     SubmitOutcome::Submitted => {}
//!     SubmitOutcome::Invalid(errors) => { /* show errors per field */ }
//!     SubmitOutcome::Failed | SubmitOutcome::Busy => {}
//! }
//! ```
//!

/// Submit state machine.
pub mod form;
/// Intake collaborators.
pub mod sinks;
/// Field rules.
pub mod validate;

pub use form::{LeadForm, SubmitOutcome};
pub use sinks::{create_submitter, LeadSubmitter};
pub use validate::{validate, FieldErrors, LeadFields};
