//! Client identification
//!
//! Derives the rate-limit key for a request from its forwarded-address header.

use axum::http::HeaderMap;

pub const FORWARDED_FOR: &str = "x-forwarded-for";

/// Shared key for every request that carries no forwarded address.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Returns the whole `x-forwarded-for` value, or `"unknown"` when the header
/// is absent or empty. Repeated headers are joined with `", "`.
///
/// Requests without the header all share one quota bucket.
pub fn client_id_from_headers(headers: &HeaderMap) -> String {
    let joined = headers
        .get_all(FORWARDED_FOR)
        .iter()
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .collect::<Vec<_>>()
        .join(", ");

    if joined.is_empty() {
        UNKNOWN_CLIENT.to_string()
    } else {
        joined
    }
}
