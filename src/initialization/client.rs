//! HTTP client initialization.

use std::time::Duration;

use crate::config::Config;
use crate::error_handling::InitializationError;
use reqwest::ClientBuilder;

/// Initializes the HTTP client used to fetch pages.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the config
/// - Request timeout from the config
/// - Redirect following limited to `max_redirects` hops
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &Config) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_client_with_defaults() {
        assert!(init_client(&Config::default()).is_ok());
    }

    #[test]
    fn test_init_client_without_redirects() {
        let config = Config {
            max_redirects: 0,
            timeout_seconds: 1,
            ..Config::default()
        };
        assert!(init_client(&config).is_ok());
    }
}
