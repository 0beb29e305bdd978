//! Field validation for contact submissions.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::gate::SubmissionPayload;

/// `local@domain.tld` shape: no whitespace, byte-order mark or extra `@` in any part.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$")
        .expect("email pattern compiles")
});

/// A user-correctable problem with a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingFields,
    InvalidEmail,
    MessageTooShort { min: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingFields => write!(f, "All fields are required"),
            ValidationError::InvalidEmail => write!(f, "Invalid email format"),
            ValidationError::MessageTooShort { min } => {
                write!(f, "Message must be at least {} characters", min)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// Checks that name, email, subject and message are all non-empty.
pub fn validate_required(payload: &SubmissionPayload) -> Result<(), ValidationError> {
    let fields = [
        &payload.name,
        &payload.email,
        &payload.subject,
        &payload.message,
    ];
    if fields.iter().all(|field| present(field).is_some()) {
        Ok(())
    } else {
        Err(ValidationError::MissingFields)
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Length is counted in UTF-16 code units, untrimmed, so a character outside
/// the Basic Multilingual Plane counts as two.
pub fn validate_message_length(message: &str, min: usize) -> Result<(), ValidationError> {
    if message.encode_utf16().count() < min {
        Err(ValidationError::MessageTooShort { min })
    } else {
        Ok(())
    }
}

/// Runs the required-field, email and message-length checks in order.
pub fn validate_payload(payload: &SubmissionPayload, min_message_length: usize) -> Result<(), ValidationError> {
    validate_required(payload)?;

    let email = payload.email.as_deref().unwrap_or_default();
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    let message = payload.message.as_deref().unwrap_or_default();
    validate_message_length(message, min_message_length)
}
