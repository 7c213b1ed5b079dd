//! Error categorization and retry strategy.
//!
//! This module maps transport errors onto the fetcher's error contract and
//! configures retries.

use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;

use super::types::FetchError;

/// Message prefix of redirect-limit failures.
const TOO_MANY_REDIRECTS: &str = "too many redirects";
/// Message prefix of oversized-body failures.
const BODY_TOO_LARGE: &str = "response body exceeds";

/// Creates an exponential backoff retry strategy.
///
/// Returns a retry strategy configured with:
/// - Initial delay: `RETRY_INITIAL_DELAY_MS` milliseconds
/// - Backoff factor: `RETRY_FACTOR`
/// - Maximum delay: `RETRY_MAX_DELAY_SECS` seconds
/// - Maximum retries: `RETRY_MAX_ATTEMPTS`
pub fn get_retry_strategy() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(crate::config::RETRY_INITIAL_DELAY_MS)
        .factor(crate::config::RETRY_FACTOR)
        .max_delay(Duration::from_secs(crate::config::RETRY_MAX_DELAY_SECS))
        .take(crate::config::RETRY_MAX_ATTEMPTS)
}

/// Categorizes a `reqwest::Error` into a `FetchError`.
///
/// Status errors keep their code, timeouts are reported as such, and every
/// other failure (connect, TLS, redirect limit, decode) becomes a network error
/// carrying the underlying message.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> FetchError {
    if let Some(status) = error.status() {
        return FetchError::HttpStatus(status.as_u16());
    }

    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_redirect() {
        FetchError::Network(format!("{TOO_MANY_REDIRECTS}: {error}"))
    } else {
        FetchError::Network(error.to_string())
    }
}

/// The error for a response body larger than `limit` bytes.
pub fn body_too_large(limit: usize) -> FetchError {
    FetchError::Network(format!("{BODY_TOO_LARGE} {limit} bytes"))
}

/// Whether a failed fetch is worth retrying.
///
/// Timeouts, connection failures and server-side (5xx) or throttling (429)
/// statuses are transient. Client errors, redirect loops and oversized bodies
/// are not.
pub fn is_retriable(error: &FetchError) -> bool {
    match error {
        FetchError::Timeout => true,
        FetchError::HttpStatus(code) => *code == 429 || (500..600).contains(code),
        FetchError::Network(message) => {
            !message.starts_with(TOO_MANY_REDIRECTS) && !message.starts_with(BODY_TOO_LARGE)
        }
    }
}
