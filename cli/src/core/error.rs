//! # SoftSell Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout the SoftSell CLI.
//! Field validation problems and collaborator failures are ordinary outcomes
//! of the lead form and are surfaced to the user as state; the variants here
//! exist so that command handlers can turn those outcomes into a non-zero
//! exit status with a readable message.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `SoftsellError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if rule.pattern.trim().is_empty() {
//!     return Err(SoftsellError::Config("Chat rule pattern cannot be empty.".into()))?;
//! }
//!
//! // Add context to errors using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read file: {}", path.display()))?;
//! ```
//!
use thiserror::Error;

/// Custom error type for the SoftSell application.
#[derive(Error, Debug)]
pub enum SoftsellError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    /// One or more lead form fields failed validation. The payload lists the
    /// offending fields, e.g. `email, message`.
    #[error("Lead form is invalid: {fields}")]
    Validation { fields: String },

    /// The lead intake collaborator rejected or failed to accept a submission.
    #[error("Lead submission failed: {0}")]
    Submission(String),

    #[error("A submission is already in flight for this form.")]
    Busy,

    #[error("Argument parsing error: {0}")]
    ArgumentParsing(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
