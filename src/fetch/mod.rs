//! Page fetching.
//!
//! Retrieves the raw markup of one page over HTTP(S). Redirects are followed up
//! to the client's configured limit, and the final URL is reported so links are
//! classified against the page that was actually served. Transient failures are
//! retried with exponential backoff.
//!
//! Bodies are capped at [`MAX_RESPONSE_BODY_SIZE`] bytes. Every failure is
//! mapped onto [`FetchError`]; callers never see partial content.

mod request;

use log::{debug, warn};
use tokio_retry::RetryIf;

use crate::config::MAX_RESPONSE_BODY_SIZE;
use crate::error_handling::{
    body_too_large, categorize_reqwest_error, get_retry_strategy, is_retriable, FetchError,
};
use request::RequestHeaders;

/// A successfully fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Full response body decoded as UTF-8 (invalid sequences replaced).
    pub markup: String,
    /// URL after following redirects.
    pub final_url: String,
    /// HTTP status of the final response (always 2xx).
    pub status: u16,
}

/// Fetches `url` once.
async fn fetch_once(client: &reqwest::Client, url: &str) -> Result<FetchedPage, FetchError> {
    let response = RequestHeaders::apply_to_request_builder(client.get(url))
        .send()
        .await
        .map_err(|e| categorize_reqwest_error(&e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    let final_url = response.url().to_string();
    let markup = read_body(response, MAX_RESPONSE_BODY_SIZE).await?;

    Ok(FetchedPage {
        markup,
        final_url,
        status: status.as_u16(),
    })
}

/// Reads the response body as text, failing once it grows past `limit` bytes.
///
/// A declared `Content-Length` over the limit fails before any of the body is
/// read; chunked or undeclared bodies are cut off as soon as they pass it.
async fn read_body(mut response: reqwest::Response, limit: usize) -> Result<String, FetchError> {
    if let Some(length) = response.content_length() {
        if length > limit as u64 {
            debug!("Declared body of {length} bytes exceeds {limit}");
            return Err(body_too_large(limit));
        }
    }

    let mut body = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| categorize_reqwest_error(&e))?
    {
        if body.len() + chunk.len() > limit {
            debug!("Body exceeded {limit} bytes while streaming");
            return Err(body_too_large(limit));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(String::from_utf8_lossy(&body).into_owned())
}

/// Fetches a page, retrying transient failures.
///
/// Timeouts, connection errors, 429 and 5xx responses are retried according to
/// [`get_retry_strategy`]. Other statuses, redirect-limit failures and
/// oversized bodies are returned immediately.
///
/// # Errors
///
/// Returns the [`FetchError`] of the last attempt.
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<FetchedPage, FetchError> {
    let result = RetryIf::spawn(
        get_retry_strategy(),
        || async {
            let attempt = fetch_once(client, url).await;
            if let Err(e) = &attempt {
                debug!("Fetch attempt for {url} failed: {e}");
            }
            attempt
        },
        is_retriable,
    )
    .await;

    match &result {
        Ok(page) => debug!(
            "Fetched {url} -> {} ({} bytes, status {})",
            page.final_url,
            page.markup.len(),
            page.status
        ),
        Err(e) => warn!("Failed to fetch {url}: {e}"),
    }
    result
}
