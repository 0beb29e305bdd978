//! Submission gate
//!
//! Decides whether a contact form submission may proceed. The checks run in a
//! fixed order: rate limit, required fields, email shape, message length,
//! honeypot. Only the rate-limit step touches state.

use std::sync::Arc;
use std::time::Duration;

use log::error;

use crate::config::GateConfig;
use crate::gate::validation::validate_payload;
use crate::gate::{GateDecision, SubmissionPayload, Timestamp};
use crate::middleware::rate_limit::{Admission, InMemoryRateStore, RateStore};

pub struct SubmissionGate {
    store: Arc<dyn RateStore>,
    max_requests: u32,
    window: Duration,
    min_message_length: usize,
}

impl SubmissionGate {
    pub fn new(store: Arc<dyn RateStore>, config: &GateConfig) -> Self {
        Self {
            store,
            max_requests: config.max_requests,
            window: config.window(),
            min_message_length: config.min_message_length,
        }
    }

    /// Gate backed by a fresh process-local store.
    pub fn in_memory(config: &GateConfig) -> Self {
        Self::new(
            Arc::new(InMemoryRateStore::new(config.max_tracked_clients)),
            config,
        )
    }

    pub fn store(&self) -> &Arc<dyn RateStore> {
        &self.store
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Full evaluation of one submission attempt.
    pub fn evaluate(
        &self,
        client_id: &str,
        payload: &SubmissionPayload,
        now: Timestamp,
    ) -> GateDecision {
        if let Err(rejection) = self.check_rate(client_id, now) {
            return rejection;
        }
        self.inspect(payload)
    }

    /// Counts the attempt against the client's window.
    ///
    /// Runs before the payload is looked at, so a throttled client is turned
    /// away even when its body is unreadable.
    pub fn check_rate(&self, client_id: &str, now: Timestamp) -> Result<(), GateDecision> {
        match self
            .store
            .increment(client_id, now, self.window, self.max_requests)
        {
            Ok(Admission::Allowed { .. }) => Ok(()),
            Ok(Admission::Limited { .. }) => Err(GateDecision::RejectedRateLimited),
            Err(e) => {
                error!("Rate check failed for {}: {}", client_id, e);
                Err(GateDecision::RejectedMalformed)
            }
        }
    }

    /// Validation and honeypot steps. Pure.
    pub fn inspect(&self, payload: &SubmissionPayload) -> GateDecision {
        if let Err(reason) = validate_payload(payload, self.min_message_length) {
            return GateDecision::RejectedInvalid(reason);
        }

        if payload.is_honeypot_filled() {
            return GateDecision::SilentlyAccepted;
        }

        GateDecision::Accepted
    }
}
