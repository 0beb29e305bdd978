//! Submission sinks
//!
//! Where accepted submissions go once the gate lets them through. The gate
//! never calls a sink; the HTTP boundary does, and only for `Accepted`.

use async_trait::async_trait;
use log::info;
use tokio::sync::Mutex;

use crate::error::StorageError;
use crate::gate::SubmissionPayload;

/// Durable destination for accepted submissions.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn record(&self, payload: &SubmissionPayload) -> Result<(), StorageError>;
}

/// Writes accepted submissions to the log and keeps nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

#[async_trait]
impl SubmissionSink for LogSink {
    async fn record(&self, payload: &SubmissionPayload) -> Result<(), StorageError> {
        info!(
            "Contact form submission: name={:?} email={:?} subject={:?} message={:?}",
            payload.name.as_deref().unwrap_or_default(),
            payload.email.as_deref().unwrap_or_default(),
            payload.subject.as_deref().unwrap_or_default(),
            payload.message.as_deref().unwrap_or_default(),
        );
        Ok(())
    }
}

/// Keeps accepted submissions in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    submissions: Mutex<Vec<SubmissionPayload>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submissions(&self) -> Vec<SubmissionPayload> {
        self.submissions.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.submissions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.submissions.lock().await.is_empty()
    }
}

#[async_trait]
impl SubmissionSink for MemorySink {
    async fn record(&self, payload: &SubmissionPayload) -> Result<(), StorageError> {
        self.submissions.lock().await.push(payload.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_sink_keeps_submissions_in_order() {
        let sink = MemorySink::new();
        let first = SubmissionPayload::new("A", "a@b.co", "one", "1234567890");
        let second = SubmissionPayload::new("B", "b@c.de", "two", "0987654321");

        sink.record(&first).await.unwrap();
        sink.record(&second).await.unwrap();

        assert_eq!(sink.submissions().await, vec![first, second]);
    }

    #[tokio::test]
    async fn test_log_sink_accepts_everything() {
        let payload = SubmissionPayload::new("A", "a@b.co", "s", "1234567890");
        assert!(LogSink.record(&payload).await.is_ok());
    }
}
