//! Request middleware
//!
//! Provides client identification, logging, and rate limiting.

pub mod client_id;
pub mod logging;
pub mod rate_limit;

pub use client_id::{UNKNOWN_CLIENT, client_id_from_headers};
pub use rate_limit::{Admission, InMemoryRateStore, RateRecord, RateStore};
