//! HTTP boundary
//!
//! Listener, routing and response mapping for the contact endpoint.

pub mod core;
pub mod responses;
pub mod routes;

pub use self::core::Server;
pub use routes::{AppState, CONTACT_PATH, build_router};
