//! Internal link analysis.
//!
//! Classifies every anchor as internal, external, fragment, or broken relative to
//! the page's host, then scores internal link volume, anchor text quality, and
//! the internal/external balance.

use serde_json::{json, Map, Value};
use std::collections::HashMap;
use url::Url;

use super::types::{object, AnalysisResult, Issue, Priority, Scorecard};
use crate::config::{
    LINK_BALANCE_MIN_EXTERNAL, MAX_ANCHOR_LENGTH, MAX_INTERNAL_LINKS,
    MIN_INTERNAL_TO_EXTERNAL_SHARE, MIN_INTERNAL_LINKS, TOP_ANCHOR_COUNT,
};
use crate::document::{DocumentQuery, Element};
use crate::utils::round_to;

/// Anchor texts that say nothing about the target page (compared lowercase).
const GENERIC_ANCHOR_TEXTS: &[&str] = &[
    "click here",
    "read more",
    "learn more",
    "here",
    "this",
    "link",
];

/// Reported as `internalToExternalRatio` when there are no external links.
pub const NO_EXTERNAL_LINKS_RATIO: &str = "N/A";

/// The attributes of an `<a>` the analyzer looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkElement {
    pub href: Option<String>,
    pub text: String,
    pub rel: Option<String>,
}

impl LinkElement {
    pub fn from_element(element: &Element) -> Self {
        Self {
            href: element.attr("href").map(str::to_string),
            text: element.text().to_string(),
            rel: element.attr("rel").map(str::to_string),
        }
    }
}

/// Where a link points relative to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// No usable `href`.
    Broken,
    /// `#fragment` within the same page.
    Fragment,
    Internal,
    External,
}

/// Whether `href` starts with `scheme:` or the protocol-relative `//`.
fn has_scheme_prefix(href: &str) -> bool {
    if href.starts_with("//") {
        return true;
    }
    let Some((scheme, _)) = href.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Classifies a link against the page host.
///
/// Root-relative paths, fragments, hrefs containing the host, and hrefs without a
/// scheme all count as same-site. Root-relative matching runs first, so
/// protocol-relative `//other.host/` links are treated as internal too.
pub fn classify_link(href: Option<&str>, page_host: &str) -> LinkKind {
    let href = match href.map(str::trim) {
        Some(href) if !href.is_empty() => href,
        _ => return LinkKind::Broken,
    };
    if href.starts_with('#') {
        return LinkKind::Fragment;
    }
    let is_internal = href.starts_with('/')
        || (!page_host.is_empty() && href.contains(page_host))
        || !has_scheme_prefix(href);
    if is_internal {
        LinkKind::Internal
    } else {
        LinkKind::External
    }
}

/// Collapses runs of whitespace in anchor text.
fn normalize_anchor_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_generic_anchor(text: &str) -> bool {
    let lower = text.to_lowercase();
    GENERIC_ANCHOR_TEXTS.contains(&lower.as_str())
}

/// Most frequent anchor texts; ties keep first-seen order.
fn top_anchor_texts(anchors: &[String], limit: usize) -> Vec<(String, usize)> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for anchor in anchors {
        match positions.get(anchor.as_str()) {
            Some(&position) => counts[position].1 += 1,
            None => {
                positions.insert(anchor.as_str(), counts.len());
                counts.push((anchor.clone(), 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts
}

#[derive(Debug, Default)]
struct LinkCounts {
    internal: usize,
    external: usize,
    fragment: usize,
    broken: usize,
    generic_anchor: usize,
    empty_anchor: usize,
    nofollow_internal: usize,
}

fn penalty(count: usize, per_link: i32, cap: i32) -> i32 {
    i32::try_from(count)
        .unwrap_or(i32::MAX)
        .saturating_mul(per_link)
        .min(cap)
}

/// Analyzes a page's links relative to `page_url`.
///
/// A malformed `page_url` does not fail the call: it yields a zero score with a
/// single issue describing the parse failure.
pub fn analyze_links(links: &[LinkElement], page_url: &str) -> AnalysisResult {
    let url = match Url::parse(page_url) {
        Ok(url) => url,
        Err(e) => {
            log::warn!("Link analysis skipped, cannot parse page URL '{page_url}': {e}");
            return AnalysisResult {
                score: 0,
                details: Map::new(),
                metrics: Map::new(),
                issues: vec![Issue::new(
                    Priority::Medium,
                    "Technical",
                    format!("Could not parse page URL '{page_url}': {e}"),
                    "Provide an absolute page URL including the scheme",
                )],
                recommendations: Vec::new(),
            };
        }
    };
    let host = url.host_str().unwrap_or_default();

    let mut counts = LinkCounts::default();
    let mut anchors: Vec<String> = Vec::new();

    for link in links {
        match classify_link(link.href.as_deref(), host) {
            LinkKind::Broken => counts.broken += 1,
            LinkKind::Fragment => counts.fragment += 1,
            LinkKind::External => counts.external += 1,
            LinkKind::Internal => {
                counts.internal += 1;
                let text = normalize_anchor_text(&link.text);
                if text.is_empty() {
                    counts.empty_anchor += 1;
                } else {
                    if is_generic_anchor(&text) {
                        counts.generic_anchor += 1;
                    }
                    anchors.push(text);
                }
                if link
                    .rel
                    .as_deref()
                    .is_some_and(|rel| rel.to_ascii_lowercase().contains("nofollow"))
                {
                    counts.nofollow_internal += 1;
                }
            }
        }
    }

    let mut card = Scorecard::new();

    if counts.internal < MIN_INTERNAL_LINKS {
        card.penalize_with_advice(
            15,
            Issue::new(
                Priority::High,
                "Internal Linking",
                format!("Very few internal links ({})", counts.internal),
                format!("Add at least {MIN_INTERNAL_LINKS} contextual links to related pages"),
            ),
        );
    } else if counts.internal > MAX_INTERNAL_LINKS {
        card.penalize_with_advice(
            8,
            Issue::new(
                Priority::Medium,
                "Internal Linking",
                format!("Too many internal links ({})", counts.internal),
                "Keep internal links to the most relevant pages to concentrate link equity",
            ),
        );
    }
    if counts.generic_anchor > 0 {
        card.penalize_with_advice(
            penalty(counts.generic_anchor, 2, 10),
            Issue::new(
                Priority::Medium,
                "Anchor Text",
                format!(
                    "{} internal link(s) use generic anchor text",
                    counts.generic_anchor
                ),
                "Replace phrases like \"click here\" with text describing the target page",
            ),
        );
    }
    if counts.empty_anchor > 0 {
        card.penalize_with_advice(
            penalty(counts.empty_anchor, 3, 8),
            Issue::new(
                Priority::Medium,
                "Anchor Text",
                format!("{} internal link(s) have no anchor text", counts.empty_anchor),
                "Give every internal link visible, descriptive text",
            ),
        );
    }
    if counts.nofollow_internal > 0 {
        card.penalize_with_advice(
            5,
            Issue::new(
                Priority::Low,
                "Internal Linking",
                format!(
                    "{} internal link(s) are marked nofollow",
                    counts.nofollow_internal
                ),
                "Remove rel=\"nofollow\" from internal links so link equity flows through the site",
            ),
        );
    }
    if counts.external > LINK_BALANCE_MIN_EXTERNAL
        && (counts.internal as f64) < counts.external as f64 * MIN_INTERNAL_TO_EXTERNAL_SHARE
    {
        card.penalize_with_advice(
            10,
            Issue::new(
                Priority::Medium,
                "Link Equity",
                format!(
                    "Internal links ({}) are fewer than 30% of external links ({})",
                    counts.internal, counts.external
                ),
                "Balance outbound links with more links to your own content",
            ),
        );
    }
    if (MIN_INTERNAL_LINKS..=MAX_INTERNAL_LINKS).contains(&counts.internal)
        && counts.generic_anchor + counts.empty_anchor + counts.nofollow_internal == 0
    {
        card.recommend("Internal linking looks healthy; keep linking new content to related pages");
    }

    let ratio = if counts.external > 0 {
        json!(round_to(counts.internal as f64 / counts.external as f64, 2))
    } else {
        json!(NO_EXTERNAL_LINKS_RATIO)
    };
    let qualifying: Vec<usize> = anchors
        .iter()
        .map(|anchor| anchor.chars().count())
        .filter(|len| *len <= MAX_ANCHOR_LENGTH)
        .collect();
    let average_anchor_length = if qualifying.is_empty() {
        0.0
    } else {
        round_to(
            qualifying.iter().sum::<usize>() as f64 / qualifying.len() as f64,
            1,
        )
    };
    let top_anchors: Vec<Value> = top_anchor_texts(&anchors, TOP_ANCHOR_COUNT)
        .into_iter()
        .map(|(text, count)| json!({ "text": text, "count": count }))
        .collect();

    log::debug!(
        "Links for {page_url}: {} internal, {} external, {} fragment, {} broken",
        counts.internal,
        counts.external,
        counts.fragment,
        counts.broken
    );

    card.finish(
        object(json!({
            "totalLinks": links.len(),
            "internalLinks": counts.internal,
            "externalLinks": counts.external,
            "fragmentLinks": counts.fragment,
            "brokenLinks": counts.broken,
            "genericAnchors": counts.generic_anchor,
            "emptyAnchors": counts.empty_anchor,
            "nofollowInternal": counts.nofollow_internal,
            "internalToExternalRatio": ratio,
            "averageAnchorLength": average_anchor_length,
        })),
        object(json!({ "topAnchors": top_anchors })),
    )
}

/// Reads every `<a>` in document order.
pub fn links_from_document<D: DocumentQuery + ?Sized>(document: &D) -> Vec<LinkElement> {
    document
        .select_by_tag("a")
        .iter()
        .map(LinkElement::from_element)
        .collect()
}
