//! SEO analyzers.
//!
//! This module contains five independent analyzers:
//! - Page meta and structure (title, description, headings, HTTPS, viewport)
//! - Image optimization (alt text, dimensions, lazy loading, formats)
//! - Internal links (volume, anchor text, internal/external balance)
//! - Readability (Flesch reading ease, content length)
//! - Social meta tags (Open Graph, Twitter Cards)
//!
//! Every analyzer is a pure function over an owned input snapshot and returns
//! an [`AnalysisResult`] whose score starts at 100, loses points per issue,
//! and is clamped to `0..=100`. No analyzer returns an error: degraded input
//! produces a low score with an explanatory issue instead.

pub mod images;
pub mod links;
pub mod page_meta;
pub mod readability;
pub mod social;
mod types;

// Re-export public API
pub use images::{analyze_images, images_from_document, ImageElement};
pub use links::{analyze_links, classify_link, links_from_document, LinkElement, LinkKind};
pub use page_meta::{analyze_page_meta, page_meta_from_document, PageMetaInput};
pub use readability::{analyze_readability, readability_from_document};
pub use social::{analyze_social, social_tags_from_document, SocialTags};
pub use types::{AnalysisResult, AnalyzerKind, Issue, Priority};
