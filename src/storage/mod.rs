//! Submission storage
//!
//! Collaborators that record accepted contact submissions.

pub mod sink;

pub use sink::{LogSink, MemorySink, SubmissionSink};
