//! Contact form payload
//!
//! Fields are optional at the type level so that a missing field reaches the
//! required-field check instead of failing deserialization.

use serde::Deserialize;

use crate::error::GateError;

/// A single contact form submission as posted by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SubmissionPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    /// Hidden form field; humans leave it empty.
    pub honeypot: Option<String>,
}

impl SubmissionPayload {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            subject: Some(subject.into()),
            message: Some(message.into()),
            honeypot: None,
        }
    }

    pub fn with_honeypot(mut self, value: impl Into<String>) -> Self {
        self.honeypot = Some(value.into());
        self
    }

    /// Parses a JSON request body. Anything that is not an object with string
    /// (or null) fields is malformed.
    pub fn from_json(body: &[u8]) -> Result<Self, GateError> {
        Ok(serde_json::from_slice(body)?)
    }

    pub fn is_honeypot_filled(&self) -> bool {
        self.honeypot.as_deref().is_some_and(|value| !value.is_empty())
    }
}
