//! # Lead Form Validation
//!
//! File: cli/src/common/lead/validate.rs
//!
//! ## Overview
//!
//! Turns raw form input (`LeadFields`) into a `LeadSubmission`, or reports every
//! failing field at once. A `LeadSubmission` can only be obtained through
//! [`validate`], so anything handed to an intake collaborator has passed these
//! rules:
//!
//! - `name`, `email` and `message` must be non-empty after trimming.
//! - `email` must look like `local@domain.tld`.
//! - `company` is optional.
//! - No maximum lengths are enforced here.
//!
//! The email check is a deliberately small heuristic, not RFC 5322.
//!
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Raw values as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadFields {
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
}


/// Form field identifiers, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Company,
    Message,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Company => "company",
            Field::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field messages for every rule that failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    fn insert(&mut self, field: Field, message: &str) {
        self.0.insert(field, message.to_string());
    }

    #[cfg(test)]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    #[cfg(test)]
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Comma-separated field names, e.g. `email, message`.
    pub fn field_list(&self) -> String {
        self.0
            .keys()
            .map(Field::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub const NAME_REQUIRED: &str = "Name is required.";
pub const EMAIL_REQUIRED: &str = "Email is required.";
pub const EMAIL_INVALID: &str = "Please enter a valid email address.";
pub const MESSAGE_REQUIRED: &str = "Please describe the license you want to sell.";

/// A lead that passed validation, with trimmed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadSubmission {
    name: String,
    email: String,
    company: Option<String>,
    message: String,
    submitted_at: DateTime<Utc>,
}

impl LeadSubmission {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// # Validate Lead Fields (`validate`)
///
/// Checks the raw form values and, when they pass, builds the `LeadSubmission`
/// handed to the intake sink. This is the only way to obtain a `LeadSubmission`.
///
/// Rules, applied to trimmed values:
/// - `name` must not be blank.
/// - `email` must not be blank and must pass `is_valid_email`.
/// - `message` must not be blank.
/// - `company` is optional; a blank company becomes `None`.
///
/// ## Arguments
///
/// * `fields`: The values as typed into the form.
///
/// ## Returns
///
/// * `Ok(LeadSubmission)`: Trimmed values plus the submission time.
/// * `Err(FieldErrors)`: One message per failing field. Every failing field is
///   reported in the same pass, never just the first.
pub fn validate(fields: &LeadFields) -> std::result::Result<LeadSubmission, FieldErrors> {
    let mut errors = FieldErrors::default();

    let name = fields.name.trim();
    let email = fields.email.trim();
    let company = fields.company.trim();
    let message = fields.message.trim();

    if name.is_empty() {
        errors.insert(Field::Name, NAME_REQUIRED);
    }
    if email.is_empty() {
        errors.insert(Field::Email, EMAIL_REQUIRED);
    } else if !is_valid_email(email) {
        errors.insert(Field::Email, EMAIL_INVALID);
    }
    if message.is_empty() {
        errors.insert(Field::Message, MESSAGE_REQUIRED);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(LeadSubmission {
        name: name.to_string(),
        email: email.to_string(),
        company: (!company.is_empty()).then(|| company.to_string()),
        message: message.to_string(),
        submitted_at: Utc::now(),
    })
}

/// `local@domain` with one `@`, a non-empty local part, a dot inside the
/// domain (not at either end), and no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
