//! Error handlers
//!
//! Logs errors that reach the HTTP boundary or the entry point.

use crate::error::types::{ContactServerError, GateError};
use log::{error, warn};

/// Handle a contact server error
pub fn handle_error(err: &ContactServerError) {
    match err {
        // client-side defect, not ours
        ContactServerError::Gate(GateError::MalformedPayload(e)) => {
            warn!("Rejected unreadable submission: {}", e)
        }
        ContactServerError::Gate(e) => error!("Contact gate failure: {}", e),
        ContactServerError::Storage(e) => error!("Contact submission not stored: {}", e),
        other => error!("Contact server error: {}", other),
    }
}
