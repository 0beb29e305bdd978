//! Logging middleware
//!
//! Provides request logging functionality.

use log::{info, warn};

use crate::gate::GateDecision;

/// Log the outcome of a submission attempt
pub fn log_decision(client_id: &str, decision: &GateDecision) {
    match decision {
        GateDecision::Accepted => info!("Submission from {} accepted", client_id),
        GateDecision::SilentlyAccepted => info!("Submission from {} discarded (honeypot)", client_id),
        GateDecision::RejectedRateLimited => warn!("Client {} is rate limited", client_id),
        GateDecision::RejectedInvalid(reason) => {
            info!("Submission from {} rejected: {}", client_id, reason)
        }
        GateDecision::RejectedMalformed => warn!("Malformed submission from {}", client_id),
    }
}
