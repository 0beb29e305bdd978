//! Contact endpoint routing
//!
//! Extracts the client id and body from a request, runs them through the gate
//! and hands accepted submissions to the sink.

use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::post;

use crate::error::{ContactServerError, handle_error};
use crate::gate::{Clock, GateDecision, SubmissionGate, SubmissionPayload};
use crate::middleware::client_id_from_headers;
use crate::middleware::logging::log_decision;
use crate::server::responses::method_not_allowed;
use crate::storage::SubmissionSink;

pub const CONTACT_PATH: &str = "/api/contact";

/// Shared handles for the request handlers
#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<SubmissionGate>,
    pub sink: Arc<dyn SubmissionSink>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(
        gate: Arc<SubmissionGate>,
        sink: Arc<dyn SubmissionSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { gate, sink, clock }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            CONTACT_PATH,
            post(submit_contact).fallback(reject_method),
        )
        .with_state(state)
}

async fn reject_method() -> Response {
    method_not_allowed()
}

async fn submit_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let client_id = client_id_from_headers(&headers);
    let now = state.clock.now();

    if let Err(rejection) = state.gate.check_rate(&client_id, now) {
        log_decision(&client_id, &rejection);
        return rejection.into_response();
    }

    let payload = match SubmissionPayload::from_json(&body) {
        Ok(payload) => payload,
        Err(e) => {
            handle_error(&ContactServerError::from(e));
            let decision = GateDecision::RejectedMalformed;
            log_decision(&client_id, &decision);
            return decision.into_response();
        }
    };

    let decision = state.gate.inspect(&payload);
    log_decision(&client_id, &decision);

    if decision == GateDecision::Accepted {
        if let Err(e) = state.sink.record(&payload).await {
            handle_error(&ContactServerError::from(e));
            return GateDecision::RejectedMalformed.into_response();
        }
    }

    decision.into_response()
}
