//! HTTP Client Utilities
//!
//! Shared HTTP client creation for the data-aggregation API.

use std::time::Duration;

/// Upper bound for establishing a TCP connection to the upstream
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Create a reqwest HTTP client with the given request timeout
///
/// The connect timeout never exceeds the request timeout.
pub fn create_http_client_with_timeout(timeout_secs: u64) -> Result<reqwest::Client, String> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS.min(timeout_secs)))
        .build()
        .map_err(|e| format!("Failed to build HTTP client: {}", e))
}
