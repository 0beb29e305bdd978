//! Error types
//!
//! Defines domain-specific error types for each part of the contact service.

use std::fmt;
use std::io;

/// Submission gate errors
#[derive(Debug)]
pub enum GateError {
    RegistryUnavailable(String),
    MalformedPayload(String),
}

impl fmt::Display for GateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateError::RegistryUnavailable(s) => write!(f, "Rate registry unavailable: {}", s),
            GateError::MalformedPayload(s) => write!(f, "Malformed payload: {}", s),
        }
    }
}

impl std::error::Error for GateError {}

impl From<serde_json::Error> for GateError {
    fn from(error: serde_json::Error) -> Self {
        GateError::MalformedPayload(error.to_string())
    }
}

/// Submission storage errors
#[derive(Debug)]
pub enum StorageError {
    Unavailable(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable(s) => write!(f, "Storage unavailable: {}", s),
        }
    }
}

impl std::error::Error for StorageError {}

/// General contact server error that encompasses all error types
#[derive(Debug)]
pub enum ContactServerError {
    Gate(GateError),
    Storage(StorageError),
    Config(config::ConfigError),
    IoError(io::Error),
}

impl fmt::Display for ContactServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactServerError::Gate(e) => write!(f, "Gate error: {}", e),
            ContactServerError::Storage(e) => write!(f, "Storage error: {}", e),
            ContactServerError::Config(e) => write!(f, "Configuration error: {}", e),
            ContactServerError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ContactServerError {}

impl From<GateError> for ContactServerError {
    fn from(error: GateError) -> Self {
        ContactServerError::Gate(error)
    }
}

impl From<StorageError> for ContactServerError {
    fn from(error: StorageError) -> Self {
        ContactServerError::Storage(error)
    }
}

impl From<config::ConfigError> for ContactServerError {
    fn from(error: config::ConfigError) -> Self {
        ContactServerError::Config(error)
    }
}

impl From<io::Error> for ContactServerError {
    fn from(error: io::Error) -> Self {
        ContactServerError::IoError(error)
    }
}
