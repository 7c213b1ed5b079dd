//! Open Graph and Twitter Card analysis.

use serde_json::json;
use url::Url;

use super::types::{object, AnalysisResult, Issue, Priority, Scorecard};
use crate::document::DocumentQuery;

/// `twitter:card` values Twitter renders.
const VALID_TWITTER_CARDS: &[&str] = &["summary", "summary_large_image", "app", "player"];

/// Social meta tag values of a page. `None` means the tag is absent or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialTags {
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub og_image_width: Option<String>,
    pub og_image_height: Option<String>,
    pub og_url: Option<String>,
    pub og_type: Option<String>,
    pub og_site_name: Option<String>,
    pub twitter_card: Option<String>,
    pub twitter_title: Option<String>,
    pub twitter_description: Option<String>,
    pub twitter_image: Option<String>,
    pub twitter_site: Option<String>,
    pub twitter_creator: Option<String>,
    pub fb_app_id: Option<String>,
}

impl SocialTags {
    /// Twitter title, falling back to `og:title`.
    pub fn effective_twitter_title(&self) -> Option<&str> {
        self.twitter_title.as_deref().or(self.og_title.as_deref())
    }

    /// Twitter description, falling back to `og:description`.
    pub fn effective_twitter_description(&self) -> Option<&str> {
        self.twitter_description
            .as_deref()
            .or(self.og_description.as_deref())
    }

    /// Twitter image, falling back to `og:image`.
    pub fn effective_twitter_image(&self) -> Option<&str> {
        self.twitter_image.as_deref().or(self.og_image.as_deref())
    }

    fn open_graph_complete(&self) -> bool {
        self.og_title.is_some()
            && self.og_description.is_some()
            && self.og_image.is_some()
            && self.og_url.is_some()
            && self.og_type.is_some()
    }

    fn twitter_complete(&self) -> bool {
        self.twitter_card.is_some()
            && self.effective_twitter_title().is_some()
            && self.effective_twitter_description().is_some()
            && self.effective_twitter_image().is_some()
    }

    fn open_graph_tag_count(&self) -> usize {
        [
            &self.og_title,
            &self.og_description,
            &self.og_image,
            &self.og_image_width,
            &self.og_image_height,
            &self.og_url,
            &self.og_type,
            &self.og_site_name,
        ]
        .iter()
        .filter(|tag| tag.is_some())
        .count()
    }

    fn twitter_tag_count(&self) -> usize {
        [
            &self.twitter_card,
            &self.twitter_title,
            &self.twitter_description,
            &self.twitter_image,
            &self.twitter_site,
            &self.twitter_creator,
        ]
        .iter()
        .filter(|tag| tag.is_some())
        .count()
    }
}

/// Whether an image reference is an absolute http(s) URL.
fn is_absolute_url(value: &str) -> bool {
    Url::parse(value).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

/// Analyzes a page's social sharing tags.
pub fn analyze_social(tags: &SocialTags) -> AnalysisResult {
    let mut card = Scorecard::new();

    if tags.og_title.is_none() {
        card.penalize_with_advice(
            10,
            Issue::new(
                Priority::High,
                "Open Graph",
                "Missing og:title tag",
                "Add an og:title meta tag with a compelling share title",
            ),
        );
    }
    if tags.og_description.is_none() {
        card.penalize_with_advice(
            8,
            Issue::new(
                Priority::Medium,
                "Open Graph",
                "Missing og:description tag",
                "Add an og:description meta tag summarising the page",
            ),
        );
    }
    match tags.og_image.as_deref() {
        None => card.penalize_with_advice(
            15,
            Issue::new(
                Priority::Critical,
                "Open Graph",
                "Missing og:image tag",
                "Add an og:image meta tag (1200x630 pixels recommended)",
            ),
        ),
        Some(image) => {
            if !is_absolute_url(image) {
                card.penalize_with_advice(
                    5,
                    Issue::new(
                        Priority::Medium,
                        "Open Graph",
                        format!("og:image is not an absolute URL: {image}"),
                        "Use an absolute https:// URL for og:image",
                    ),
                );
            }
            if tags.og_image_width.is_none() && tags.og_image_height.is_none() {
                card.penalize_with_advice(
                    3,
                    Issue::new(
                        Priority::Low,
                        "Open Graph",
                        "og:image has no width or height tags",
                        "Add og:image:width and og:image:height so previews render without a refetch",
                    ),
                );
            }
        }
    }
    if tags.og_url.is_none() {
        card.penalize_with_advice(
            5,
            Issue::new(
                Priority::Medium,
                "Open Graph",
                "Missing og:url tag",
                "Add an og:url meta tag with the canonical page URL",
            ),
        );
    }
    if tags.og_type.is_none() {
        card.penalize_with_advice(
            3,
            Issue::new(
                Priority::Low,
                "Open Graph",
                "Missing og:type tag",
                "Add an og:type meta tag such as \"website\" or \"article\"",
            ),
        );
    }

    match tags.twitter_card.as_deref() {
        None => card.penalize_with_advice(
            10,
            Issue::new(
                Priority::High,
                "Twitter Card",
                "Missing twitter:card tag",
                "Add a twitter:card meta tag, usually \"summary_large_image\"",
            ),
        ),
        Some(kind) if !VALID_TWITTER_CARDS.contains(&kind) => card.penalize_with_advice(
            3,
            Issue::new(
                Priority::Medium,
                "Twitter Card",
                format!("Invalid twitter:card type '{kind}'"),
                format!("Use one of: {}", VALID_TWITTER_CARDS.join(", ")),
            ),
        ),
        Some(_) => {}
    }
    if tags.twitter_image.is_none() && tags.og_image.is_none() {
        card.penalize_with_advice(
            5,
            Issue::new(
                Priority::Medium,
                "Twitter Card",
                "No image available for Twitter cards",
                "Add a twitter:image or og:image meta tag",
            ),
        );
    }
    if tags.twitter_site.is_none() {
        card.penalize_with_advice(
            3,
            Issue::new(
                Priority::Low,
                "Twitter Card",
                "Missing twitter:site tag",
                "Add a twitter:site meta tag with the site's @handle",
            ),
        );
    }

    let has_basic_setup = tags.og_title.is_some() && tags.og_image.is_some();
    let has_complete_setup = tags.og_title.is_some()
        && tags.og_description.is_some()
        && tags.og_image.is_some()
        && tags.og_url.is_some()
        && tags.twitter_card.is_some();

    if has_complete_setup {
        card.recommend("Validate share previews with each platform's card debugger after changes");
    }

    let details = object(json!({
        "openGraph": {
            "title": tags.og_title,
            "description": tags.og_description,
            "image": tags.og_image,
            "imageWidth": tags.og_image_width,
            "imageHeight": tags.og_image_height,
            "url": tags.og_url,
            "type": tags.og_type,
            "siteName": tags.og_site_name,
            "complete": tags.open_graph_complete(),
        },
        "twitter": {
            "card": tags.twitter_card,
            "title": tags.effective_twitter_title(),
            "description": tags.effective_twitter_description(),
            "image": tags.effective_twitter_image(),
            "site": tags.twitter_site,
            "creator": tags.twitter_creator,
            "complete": tags.twitter_complete(),
        },
        "facebookAppId": tags.fb_app_id,
        "hasBasicSetup": has_basic_setup,
        "hasCompleteSetup": has_complete_setup,
    }));
    let metrics = object(json!({
        "openGraphTags": tags.open_graph_tag_count(),
        "twitterTags": tags.twitter_tag_count(),
    }));

    let result = card.finish(metrics, details);
    log::debug!(
        "Social: score {} ({} issues, complete setup: {has_complete_setup})",
        result.score,
        result.issues.len()
    );
    result
}

/// Reads the social meta tags from a document.
pub fn social_tags_from_document<D: DocumentQuery + ?Sized>(document: &D) -> SocialTags {
    SocialTags {
        og_title: document.meta_content("og:title"),
        og_description: document.meta_content("og:description"),
        og_image: document.meta_content("og:image"),
        og_image_width: document.meta_content("og:image:width"),
        og_image_height: document.meta_content("og:image:height"),
        og_url: document.meta_content("og:url"),
        og_type: document.meta_content("og:type"),
        og_site_name: document.meta_content("og:site_name"),
        twitter_card: document.meta_content("twitter:card"),
        twitter_title: document.meta_content("twitter:title"),
        twitter_description: document.meta_content("twitter:description"),
        twitter_image: document.meta_content("twitter:image"),
        twitter_site: document.meta_content("twitter:site"),
        twitter_creator: document.meta_content("twitter:creator"),
        fb_app_id: document.meta_content("fb:app_id"),
    }
}
