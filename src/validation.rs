//! Lead intake validation
//!
//! Turns an untrusted [`LeadSubmission`] into a [`ValidatedLead`]. Checks run
//! in a fixed order and stop at the first failure, so the same input always
//! yields the same error:
//! 1. Required fields present (first name, last name, email)
//! 2. Email shape
//! 3. Names trimmed, non-empty and digit-free
//! 4. Phone (if given) is a valid international number
//!
//! Nothing in here performs I/O.

use crate::models::{LeadSubmission, ValidatedLead};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Mailbox shape: `local@label.label...tld`, final label at least two chars.
/// Not an RFC 5322 check.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@([^\s@.,]+\.)+[^\s@.,]{2,}$").expect("email regex is valid")
});

/// Reason a submission was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// First name, last name or email is missing or empty.
    MissingRequiredField,
    /// Email does not have a mailbox shape.
    InvalidEmailFormat,
    /// A name is blank after trimming or contains a digit.
    InvalidName,
    /// Phone was given but is not a valid international number.
    InvalidPhone,
}

impl ValidationError {
    /// Human-readable message returned to the client.
    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::MissingRequiredField => {
                "First Name, Last Name, and Email are required."
            }
            ValidationError::InvalidEmailFormat => "Invalid email format.",
            ValidationError::InvalidName => "Names cannot contain digits",
            ValidationError::InvalidPhone => "Invalid phone number",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Validate a submission and normalize its optional fields.
pub fn validate(input: &LeadSubmission) -> Result<ValidatedLead, ValidationError> {
    let (Some(first_name), Some(last_name), Some(email)) = (
        present(&input.first_name),
        present(&input.last_name),
        present(&input.email),
    ) else {
        return Err(ValidationError::MissingRequiredField);
    };

    if !is_valid_email(email) {
        tracing::debug!("Rejected email with invalid shape");
        return Err(ValidationError::InvalidEmailFormat);
    }

    let (Some(first_name), Some(last_name)) =
        (normalize_name(first_name), normalize_name(last_name))
    else {
        return Err(ValidationError::InvalidName);
    };

    let phone = present(&input.phone);
    if let Some(phone) = phone {
        if !is_valid_phone(phone) {
            return Err(ValidationError::InvalidPhone);
        }
    }

    Ok(ValidatedLead {
        first_name,
        last_name,
        email: email.to_string(),
        phone: phone.unwrap_or_default().to_string(),
        how_did_you_hear: input.how_did_you_hear.clone().unwrap_or_default(),
        how_can_we_help: input.how_can_we_help.clone().unwrap_or_default(),
    })
}

/// `None` for a missing or empty field.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// Check that an email address has a basic mailbox shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Trim a name, rejecting it if it ends up empty or contains an ASCII digit.
pub fn normalize_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(trimmed.to_string())
}

/// Check a phone number with the phonenumber library (port of Google's libphonenumber).
///
/// No default region is assumed, so the number must carry its country code
/// (`+14155552671`).
pub fn is_valid_phone(raw: &str) -> bool {
    match phonenumber::parse(None, raw) {
        Ok(number) => phonenumber::is_valid(&number),
        Err(e) => {
            tracing::debug!("Failed to parse phone number: {:?}", e);
            false
        }
    }
}
