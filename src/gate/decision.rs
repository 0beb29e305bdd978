//! Gate outcomes

use crate::gate::ValidationError;

/// What the gate decided about one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Passed every check; the caller should record the submission.
    Accepted,
    /// Honeypot was filled. Looks like success to the caller but is discarded.
    SilentlyAccepted,
    /// Too many requests from this client in the current window.
    RejectedRateLimited,
    RejectedInvalid(ValidationError),
    /// Body could not be read as a submission, or the gate itself failed.
    RejectedMalformed,
}
