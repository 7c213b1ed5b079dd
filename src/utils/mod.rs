//! Utility functions.
//!
//! This module provides:
//! - CSS selector parsing utilities
//! - Numeric rounding for reported metrics

mod selector;

pub use selector::{is_valid_tag_name, parse_selector_unsafe, parse_selector_with_fallback};

/// Rounds `value` to `decimals` decimal places (half away from zero).
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
