//! Page metadata and structure checks: title, meta description, headings,
//! image alt coverage, HTTPS, and the mobile viewport tag.
//!
//! Lengths are measured in characters, not bytes.

use serde_json::{json, Map};
use url::Url;

use super::types::{object, AnalysisResult, Issue, Priority, Scorecard};
use crate::config::{
    MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH, MIN_DESCRIPTION_LENGTH, MIN_TITLE_LENGTH,
    MISSING_ALT_META_PENALTY_CAP,
};
use crate::document::DocumentQuery;

/// Everything the page meta checks need, extracted up front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetaInput {
    /// Trimmed `<title>` text; `None` when absent or blank.
    pub title: Option<String>,
    /// Trimmed meta description; `None` when absent or blank.
    pub description: Option<String>,
    /// Trimmed text of every `<h1>`, in document order.
    pub h1s: Vec<String>,
    pub h2_count: usize,
    pub image_count: usize,
    pub images_missing_alt: usize,
    pub has_viewport: bool,
    pub is_https: bool,
    /// Meta keywords, lowercased. Reported only.
    pub keywords: Vec<String>,
}

/// Splits a `keywords` meta value into trimmed, lowercased, non-empty entries.
pub fn parse_keywords(content: &str) -> Vec<String> {
    content
        .split(',')
        .map(|keyword| keyword.trim().to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .collect()
}

/// Runs the page meta and structure checks.
pub fn analyze_page_meta(input: &PageMetaInput) -> AnalysisResult {
    let mut card = Scorecard::new();

    let title_length = input.title.as_deref().map(|title| title.chars().count());
    match title_length {
        None => card.penalize_with_advice(
            10,
            Issue::new(
                Priority::High,
                "Meta Tags",
                "Missing page title",
                "Add a unique, descriptive <title> to the page",
            ),
        ),
        Some(length) if length < MIN_TITLE_LENGTH => card.penalize_with_advice(
            5,
            Issue::new(
                Priority::Medium,
                "Meta Tags",
                format!("Title is too short ({length} characters)"),
                format!("Expand the title to {MIN_TITLE_LENGTH}-{MAX_TITLE_LENGTH} characters"),
            ),
        ),
        Some(length) if length > MAX_TITLE_LENGTH => card.penalize_with_advice(
            2,
            Issue::new(
                Priority::Low,
                "Meta Tags",
                format!("Title is too long ({length} characters)"),
                format!("Shorten the title to at most {MAX_TITLE_LENGTH} characters to avoid truncation"),
            ),
        ),
        Some(_) => {}
    }

    let description_length = input
        .description
        .as_deref()
        .map(|description| description.chars().count());
    match description_length {
        None => card.penalize_with_advice(
            5,
            Issue::new(
                Priority::Medium,
                "Meta Tags",
                "Missing meta description",
                "Add a meta description summarising the page",
            ),
        ),
        Some(length) if length < MIN_DESCRIPTION_LENGTH => card.penalize_with_advice(
            2,
            Issue::new(
                Priority::Low,
                "Meta Tags",
                format!("Meta description is too short ({length} characters)"),
                format!(
                    "Expand the meta description to {MIN_DESCRIPTION_LENGTH}-{MAX_DESCRIPTION_LENGTH} characters"
                ),
            ),
        ),
        Some(length) if length > MAX_DESCRIPTION_LENGTH => card.penalize_with_advice(
            1,
            Issue::new(
                Priority::Low,
                "Meta Tags",
                format!("Meta description is too long ({length} characters)"),
                format!("Trim the meta description to at most {MAX_DESCRIPTION_LENGTH} characters"),
            ),
        ),
        Some(_) => {}
    }

    match input.h1s.len() {
        0 => card.penalize_with_advice(
            10,
            Issue::new(
                Priority::High,
                "Structure",
                "No H1 heading found",
                "Add a single H1 that states the page topic",
            ),
        ),
        1 => {}
        count => card.penalize_with_advice(
            5,
            Issue::new(
                Priority::Medium,
                "Structure",
                format!("Multiple H1 headings found ({count})"),
                "Keep one H1 and demote the others to H2",
            ),
        ),
    }

    if input.images_missing_alt > 0 {
        let points = i32::try_from(input.images_missing_alt)
            .unwrap_or(i32::MAX)
            .min(MISSING_ALT_META_PENALTY_CAP);
        card.penalize_with_advice(
            points,
            Issue::new(
                Priority::Medium,
                "Accessibility",
                format!(
                    "{} of {} image(s) missing alt text",
                    input.images_missing_alt, input.image_count
                ),
                "Add alt text to every informative image",
            ),
        );
    }

    if !input.is_https {
        card.penalize_with_advice(
            10,
            Issue::new(
                Priority::High,
                "Security",
                "Page is not served over HTTPS",
                "Serve the page over HTTPS and redirect plain HTTP",
            ),
        );
    }
    if !input.has_viewport {
        card.penalize_with_advice(
            10,
            Issue::new(
                Priority::High,
                "Mobile",
                "Missing viewport meta tag",
                "Add <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">",
            ),
        );
    }

    if is_clean(input) {
        card.recommend("Page metadata and structure look solid; keep titles and descriptions unique per page");
    }

    let metrics = object(json!({
        "titleLength": title_length.unwrap_or(0),
        "descriptionLength": description_length.unwrap_or(0),
        "h1Count": input.h1s.len(),
        "h2Count": input.h2_count,
        "firstH1": input.h1s.first(),
        "imageCount": input.image_count,
        "imagesMissingAlt": input.images_missing_alt,
        "hasViewport": input.has_viewport,
        "isHttps": input.is_https,
        "keywords": input.keywords,
    }));

    let result = card.finish(metrics, Map::new());
    log::debug!(
        "Page meta: score {} ({} issues)",
        result.score,
        result.issues.len()
    );
    result
}

fn is_clean(input: &PageMetaInput) -> bool {
    let in_range = |value: Option<&String>, min: usize, max: usize| {
        value.is_some_and(|value| (min..=max).contains(&value.chars().count()))
    };
    in_range(input.title.as_ref(), MIN_TITLE_LENGTH, MAX_TITLE_LENGTH)
        && in_range(
            input.description.as_ref(),
            MIN_DESCRIPTION_LENGTH,
            MAX_DESCRIPTION_LENGTH,
        )
        && input.h1s.len() == 1
        && input.images_missing_alt == 0
        && input.is_https
        && input.has_viewport
}

/// Extracts the page meta input from a document and the page URL.
///
/// A `page_url` that does not parse counts as not HTTPS.
pub fn page_meta_from_document<D: DocumentQuery + ?Sized>(
    document: &D,
    page_url: &str,
) -> PageMetaInput {
    let images = document.select_by_tag("img");
    PageMetaInput {
        title: document.first_text("title").filter(|title| !title.is_empty()),
        description: document.meta_content("description"),
        h1s: document
            .select_by_tag("h1")
            .iter()
            .map(|h1| h1.text().split_whitespace().collect::<Vec<_>>().join(" "))
            .collect(),
        h2_count: document.count("h2"),
        image_count: images.len(),
        images_missing_alt: images.iter().filter(|img| !img.has_attr("alt")).count(),
        has_viewport: !document
            .select_by_attribute("meta", "name", &|name| {
                name.trim().eq_ignore_ascii_case("viewport")
            })
            .is_empty(),
        is_https: Url::parse(page_url).is_ok_and(|url| url.scheme() == "https"),
        keywords: document
            .meta_content("keywords")
            .map(|content| parse_keywords(&content))
            .unwrap_or_default(),
    }
}
