//! Error handling.
//!
//! This module provides:
//! - Error type definitions for initialization, fetching, and input validation
//! - Categorization of transport errors into the fetcher's error contract
//! - Retry strategy configuration
//!
//! Analyzers are not represented here: they always produce a well-formed result
//! and surface problems as issues rather than errors.

mod categorization;
mod types;

// Re-export public API
pub use categorization::{body_too_large, categorize_reqwest_error, get_retry_strategy, is_retriable};
pub use types::{FetchError, InitializationError, InputError};
