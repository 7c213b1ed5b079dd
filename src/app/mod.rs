//! Main application modules.
//!
//! This module provides URL validation and report rendering used by the
//! binary and by [`crate::run_audit`].

pub mod summary;
pub mod url;

// Re-export public API
pub use summary::{log_summary, render_summary};
pub use url::validate_and_normalize_url;
