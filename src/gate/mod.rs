//! Contact submission gate
//!
//! Rate limiting, field validation and spam-trap filtering for contact form
//! submissions.

pub mod clock;
pub mod core;
pub mod decision;
pub mod payload;
pub mod validation;

pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use self::core::SubmissionGate;
pub use decision::GateDecision;
pub use payload::SubmissionPayload;
pub use validation::ValidationError;
