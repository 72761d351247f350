//! HTTP client creation and configuration utilities

use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use std::time::Duration;

/// Creates a properly configured HTTP client with connection pooling and timeout handling.
///
/// # Features
/// * Whole-request timeout (default: 15 seconds, configurable via config/env)
/// * Connection pooling with centralized pool size configuration
/// * `Accept: application/json` on every request
pub fn create_http_client_with_timeout(timeout: Duration) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    Client::builder()
        .timeout(timeout)
        .default_headers(headers)
        .pool_max_idle_per_host(crate::constants::HTTP_POOL_MAX_IDLE_PER_HOST)
        .build()
}
