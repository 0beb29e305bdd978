//! HTTP responses
//!
//! Maps gate decisions to status codes and JSON bodies.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use crate::gate::GateDecision;

pub const CONFIRMATION: &str = "Thank you for your message! I will get back to you soon.";
pub const RATE_LIMITED: &str = "Too many requests. Please try again later.";
pub const SUBMIT_FAILED: &str = "Failed to submit form. Please try again later.";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

/// Status code for a decision
pub fn decision_to_status(decision: &GateDecision) -> StatusCode {
    match decision {
        GateDecision::Accepted | GateDecision::SilentlyAccepted => StatusCode::OK,
        GateDecision::RejectedRateLimited => StatusCode::TOO_MANY_REQUESTS,
        GateDecision::RejectedInvalid(_) => StatusCode::BAD_REQUEST,
        GateDecision::RejectedMalformed => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// JSON body for a decision
///
/// A honeypot hit gets a bare success body; rate-limit and malformed failures
/// get generic text so thresholds and internals stay hidden.
pub fn decision_body(decision: &GateDecision) -> Value {
    match decision {
        GateDecision::Accepted => json!({ "success": true, "message": CONFIRMATION }),
        GateDecision::SilentlyAccepted => json!({ "success": true }),
        GateDecision::RejectedRateLimited => json!({ "error": RATE_LIMITED }),
        GateDecision::RejectedInvalid(reason) => json!({ "error": reason.to_string() }),
        GateDecision::RejectedMalformed => json!({ "error": SUBMIT_FAILED }),
    }
}

impl IntoResponse for GateDecision {
    fn into_response(self) -> Response {
        (decision_to_status(&self), Json(decision_body(&self))).into_response()
    }
}

pub fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": METHOD_NOT_ALLOWED })),
    )
        .into_response()
}
