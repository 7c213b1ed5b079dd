//! Error type definitions.
//!
//! This module defines the typed failures raised outside the analyzers: logger and
//! client initialization, page fetching, and input validation. Analyzers themselves
//! never fail; they report problems as issues.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Failures of the page fetcher.
///
/// The engine never sees partial content: a fetch either yields the full markup
/// or one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request did not complete within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The server answered with a non-success status code.
    #[error("HTTP status error: {0}")]
    HttpStatus(u16),

    /// Connection, TLS, redirect-limit, or body-decoding failure.
    #[error("Network error: {0}")]
    Network(String),
}

impl FetchError {
    /// Short machine-readable label used in failed reports.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Timeout => "timeout",
            FetchError::HttpStatus(_) => "http_status",
            FetchError::Network(_) => "network",
        }
    }
}

/// Errors in the input supplied to an audit run.
#[derive(Error, Debug)]
pub enum InputError {
    /// No URL was supplied.
    #[error("No URL supplied")]
    EmptyUrl,

    /// The URL is malformed or too long.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The URL uses a scheme other than http or https.
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    /// The local markup file could not be read.
    #[error("Failed to read markup file: {0}")]
    Read(#[from] std::io::Error),
}
