//! # SoftSell Common Modules (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared logic used by more than one command group. Command handlers
//! (`commands::`) stay thin and call into these modules; infrastructure such
//! as config and errors lives in `core::`.
//!
//! - **`chat`**: the support chat widget: keyword responder, transcript, session.
//! - **`lead`**: the lead form: validation, submit state machine, intake collaborators.
//! - **`notify`**: user notifications (toasts) raised by the lead form.
//! - **`fs`**: filesystem helpers.
//!
//! ```rust
//! use crate::common::chat::Responder;
//! use crate::common::lead::{LeadForm, SubmitOutcome};
//! ```
//!

/// Chat widget logic.
pub mod chat;
/// Filesystem helpers (directory creation, file I/O).
pub mod fs;
/// Lead form logic.
pub mod lead;
/// User notifications.
pub mod notify;
