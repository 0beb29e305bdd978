pub mod config;
pub mod error;
pub mod gate;
pub mod middleware;
pub mod server;
pub mod storage;

pub use gate::{GateDecision, SubmissionGate, SubmissionPayload};
pub use server::Server;
