//! Image optimization analysis.
//!
//! Inspects every `<img>` for accessibility (alt text) and performance
//! attributes (explicit dimensions, lazy loading, modern formats).

use serde_json::{json, Value};

use super::types::{object, AnalysisResult, Issue, Priority, Scorecard};
use crate::config::{
    EMPTY_ALT_PENALTY_CAP, FOLD_IMAGE_INDEX, LAZY_LOAD_MIN_IMAGES, LAZY_LOAD_PENALTY_CAP,
    LEGACY_FORMAT_PENALTY_CAP, MAX_IMAGE_DETAILS, MISSING_ALT_PENALTY_CAP,
    MISSING_DIMENSIONS_PENALTY_CAP,
};
use crate::document::{DocumentQuery, Element};
use crate::utils::round_to;

/// Extensions counted as legacy (non-WebP/AVIF) formats.
const LEGACY_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Extensions recognised when checking for generic filenames.
const KNOWN_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "avif", "svg"];

/// Filename stems (before optional digits) that say nothing about the image.
const GENERIC_FILENAME_STEMS: &[&str] = &["image", "img", "photo", "pic", "picture"];

/// The attributes of an `<img>` the analyzer looks at.
///
/// Each field is `None` when the attribute is absent; a present but empty
/// attribute is `Some("")`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageElement {
    pub src: Option<String>,
    pub alt: Option<String>,
    pub loading: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
}

impl ImageElement {
    /// Reads an image snapshot, falling back to `data-src` for lazy-loading libraries.
    pub fn from_element(element: &Element) -> Self {
        let src = element
            .attr("src")
            .filter(|src| !src.trim().is_empty())
            .or_else(|| element.attr("data-src"))
            .map(str::to_string);
        Self {
            src,
            alt: element.attr("alt").map(str::to_string),
            loading: element.attr("loading").map(str::to_string),
            width: element.attr("width").map(str::to_string),
            height: element.attr("height").map(str::to_string),
        }
    }
}

/// Final path segment of an image URL, without query string or fragment.
fn file_name(src: &str) -> &str {
    let path = src.split(['?', '#']).next().unwrap_or(src);
    path.rsplit('/').next().unwrap_or(path)
}

/// Lowercase extension of an image URL, if it has one.
fn extension(src: &str) -> Option<String> {
    file_name(src)
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Whether the image is served in a legacy format (JPEG, PNG, GIF).
pub fn is_legacy_format(src: &str) -> bool {
    extension(src).is_some_and(|ext| LEGACY_EXTENSIONS.contains(&ext.as_str()))
}

/// Whether the filename is a generic stem such as `image`, `img2`, or `photo123`.
pub fn is_generic_filename(src: &str) -> bool {
    let Some((stem, ext)) = file_name(src).rsplit_once('.') else {
        return false;
    };
    if !KNOWN_IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) {
        return false;
    }
    let stem = stem.to_ascii_lowercase();
    GENERIC_FILENAME_STEMS.contains(&stem.trim_end_matches(|c: char| c.is_ascii_digit()))
}

#[derive(Debug, Default)]
struct ImageCounts {
    missing_alt: usize,
    empty_alt: usize,
    missing_dimensions: usize,
    not_lazy_loaded: usize,
    legacy_format: usize,
    generic_filename: usize,
}

/// Flags raised for one image, in check order.
fn image_flags(index: usize, image: &ImageElement) -> Vec<&'static str> {
    let mut flags = Vec::new();
    match image.alt.as_deref() {
        None => flags.push("missing-alt"),
        Some(alt) if alt.trim().is_empty() => flags.push("empty-alt"),
        Some(_) => {}
    }
    if image.width.is_none() || image.height.is_none() {
        flags.push("missing-dimensions");
    }
    if index > FOLD_IMAGE_INDEX && image.loading.is_none() {
        flags.push("not-lazy-loaded");
    }
    if let Some(src) = image.src.as_deref() {
        if is_legacy_format(src) {
            flags.push("legacy-format");
        }
        if is_generic_filename(src) {
            flags.push("generic-filename");
        }
    }
    flags
}

fn capped(points: usize, cap: i32) -> i32 {
    i32::try_from(points).unwrap_or(i32::MAX).min(cap)
}

/// Analyzes a page's images.
///
/// `page_url` is the canonical URL of the page the images belong to.
pub fn analyze_images(images: &[ImageElement], page_url: &str) -> AnalysisResult {
    let mut card = Scorecard::new();

    if images.is_empty() {
        log::debug!("Images for {page_url}: none found");
        card.recommend("Add relevant images with descriptive alt text to enrich the content");
        return card.finish(
            object(json!({
                "totalImages": 0,
                "missingAlt": 0,
                "emptyAlt": 0,
                "missingDimensions": 0,
                "notLazyLoaded": 0,
                "legacyFormat": 0,
                "genericFilenames": 0,
                "optimizationRate": 100.0,
            })),
            object(json!({ "images": [] })),
        );
    }

    let total = images.len();
    let mut counts = ImageCounts::default();
    let mut details: Vec<Value> = Vec::new();

    for (index, image) in images.iter().enumerate() {
        let flags = image_flags(index, image);
        for flag in &flags {
            match *flag {
                "missing-alt" => counts.missing_alt += 1,
                "empty-alt" => counts.empty_alt += 1,
                "missing-dimensions" => counts.missing_dimensions += 1,
                "not-lazy-loaded" => counts.not_lazy_loaded += 1,
                "legacy-format" => counts.legacy_format += 1,
                "generic-filename" => counts.generic_filename += 1,
                _ => {}
            }
        }
        if !flags.is_empty() && details.len() < MAX_IMAGE_DETAILS {
            details.push(json!({
                "index": index,
                "src": image.src,
                "alt": image.alt,
                "issues": flags,
            }));
        }
    }

    if counts.missing_alt > 0 {
        let issue = Issue::new(
            Priority::High,
            "Accessibility",
            format!("{} image(s) missing alt attribute", counts.missing_alt),
            "Add descriptive alt text to every informative image",
        );
        card.penalize_with_advice(capped(counts.missing_alt * 2, MISSING_ALT_PENALTY_CAP), issue);
    }
    if counts.empty_alt > 0 {
        let issue = Issue::new(
            Priority::Low,
            "Accessibility",
            format!("{} image(s) have an empty alt attribute", counts.empty_alt),
            "Keep alt=\"\" only for purely decorative images; describe the rest",
        );
        card.penalize_with_advice(capped(counts.empty_alt, EMPTY_ALT_PENALTY_CAP), issue);
    }
    if counts.missing_dimensions > 0 {
        let issue = Issue::new(
            Priority::Medium,
            "Performance",
            format!(
                "{} image(s) missing width or height attributes",
                counts.missing_dimensions
            ),
            "Set explicit width and height to prevent layout shift",
        );
        card.penalize_with_advice(
            capped(counts.missing_dimensions / 2, MISSING_DIMENSIONS_PENALTY_CAP),
            issue,
        );
    }
    if counts.not_lazy_loaded > 0 && total > LAZY_LOAD_MIN_IMAGES {
        let issue = Issue::new(
            Priority::Medium,
            "Performance",
            format!(
                "{} below-the-fold image(s) are not lazy loaded",
                counts.not_lazy_loaded
            ),
            "Add loading=\"lazy\" to images below the fold",
        );
        card.penalize_with_advice(capped(counts.not_lazy_loaded / 3, LAZY_LOAD_PENALTY_CAP), issue);
    }
    if counts.legacy_format > 0 {
        let issue = Issue::new(
            Priority::Low,
            "Performance",
            format!(
                "{} image(s) use legacy formats (JPEG, PNG, GIF)",
                counts.legacy_format
            ),
            "Serve WebP or AVIF versions for smaller file sizes",
        );
        card.penalize_with_advice(capped(counts.legacy_format / 5, LEGACY_FORMAT_PENALTY_CAP), issue);
    }
    if counts.generic_filename > 0 {
        let issue = Issue::new(
            Priority::Low,
            "SEO",
            format!("{} image(s) have generic filenames", counts.generic_filename),
            "Use descriptive filenames such as red-running-shoes.webp",
        );
        card.recommend(issue.recommendation());
        card.flag(issue);
    }
    if counts.missing_alt + counts.empty_alt + counts.missing_dimensions + counts.legacy_format == 0 {
        card.recommend("Images are well optimized; keep the same standard for new images");
    }

    // An image can count against several categories, so the rate may go negative.
    let flagged = counts.missing_alt + counts.empty_alt + counts.missing_dimensions;
    let optimization_rate = round_to((total as f64 - flagged as f64) / total as f64 * 100.0, 1);

    log::debug!(
        "Images for {page_url}: {total} total, {} missing alt, {} missing dimensions, {} legacy",
        counts.missing_alt,
        counts.missing_dimensions,
        counts.legacy_format
    );

    card.finish(
        object(json!({
            "totalImages": total,
            "missingAlt": counts.missing_alt,
            "emptyAlt": counts.empty_alt,
            "missingDimensions": counts.missing_dimensions,
            "notLazyLoaded": counts.not_lazy_loaded,
            "legacyFormat": counts.legacy_format,
            "genericFilenames": counts.generic_filename,
            "optimizationRate": optimization_rate,
        })),
        object(json!({ "images": details })),
    )
}

/// Reads every `<img>` in document order.
pub fn images_from_document<D: DocumentQuery + ?Sized>(document: &D) -> Vec<ImageElement> {
    document
        .select_by_tag("img")
        .iter()
        .map(ImageElement::from_element)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(src: &str, alt: Option<&str>, dims: bool, loading: Option<&str>) -> ImageElement {
        ImageElement {
            src: Some(src.to_string()),
            alt: alt.map(str::to_string),
            loading: loading.map(str::to_string),
            width: dims.then(|| "640".to_string()),
            height: dims.then(|| "480".to_string()),
        }
    }

    #[test]
    fn test_no_images() {
        let result = analyze_images(&[], "https://example.com/");
        assert_eq!(result.score, 100);
        assert!(result.issues.is_empty());
        assert_eq!(result.recommendations.len(), 1);
    }

    #[test]
    fn test_ten_images_missing_alt() {
        let images: Vec<_> = (0..10)
            .map(|i| image(&format!("/media/shoes-{i}.webp"), None, true, Some("lazy")))
            .collect();
        let result = analyze_images(&images, "https://example.com/");
        assert_eq!(result.metric_u64("missingAlt"), Some(10));
        assert_eq!(result.score, 85);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].priority(), Priority::High);
        assert_eq!(result.issues[0].category(), "Accessibility");
    }

    #[test]
    fn test_mixed_images_exact_score() {
        let images = vec![
            image("hero.jpg", Some("Hero"), true, None),
            ImageElement {
                src: Some("img1.png".into()),
                alt: Some(String::new()),
                ..Default::default()
            },
            ImageElement {
                src: Some("/assets/banner.webp?v=3".into()),
                alt: Some("Banner".into()),
                width: Some("100".into()),
                ..Default::default()
            },
            image("photo.JPG?size=large", Some("x"), true, None),
            image("a.gif", None, true, Some("lazy")),
            image("b.png", Some("b"), true, None),
            image("c.avif", Some("c"), true, None),
        ];
        let result = analyze_images(&images, "https://example.com/");
        assert_eq!(result.metric_u64("totalImages"), Some(7));
        assert_eq!(result.metric_u64("missingAlt"), Some(1));
        assert_eq!(result.metric_u64("emptyAlt"), Some(1));
        assert_eq!(result.metric_u64("missingDimensions"), Some(2));
        assert_eq!(result.metric_u64("notLazyLoaded"), Some(3));
        assert_eq!(result.metric_u64("legacyFormat"), Some(5));
        assert_eq!(result.metric_u64("genericFilenames"), Some(2));
        // 100 - 2 (alt) - 1 (empty) - 1 (dims) - 1 (lazy) - 1 (legacy)
        assert_eq!(result.score, 94);
        assert_eq!(result.metric("optimizationRate"), Some(&json!(42.9)));
        let details = result.detail("images").and_then(Value::as_array).unwrap();
        assert_eq!(details.len(), 7);
    }

    #[test]
    fn test_lazy_loading_only_counts_below_fold() {
        let images: Vec<_> = (0..3)
            .map(|i| image(&format!("/m/{i}.webp"), Some("a"), true, None))
            .collect();
        let result = analyze_images(&images, "https://example.com/");
        assert_eq!(result.metric_u64("notLazyLoaded"), Some(0));
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_lazy_loading_penalty_needs_more_than_five_images() {
        let images: Vec<_> = (0..5)
            .map(|i| image(&format!("/m/{i}.webp"), Some("a"), true, None))
            .collect();
        let result = analyze_images(&images, "https://example.com/");
        assert_eq!(result.metric_u64("notLazyLoaded"), Some(2));
        assert_eq!(result.score, 100);
        assert!(result.issues.is_empty());

        let images: Vec<_> = (0..12)
            .map(|i| image(&format!("/m/{i}.webp"), Some("a"), true, None))
            .collect();
        let result = analyze_images(&images, "https://example.com/");
        assert_eq!(result.metric_u64("notLazyLoaded"), Some(9));
        assert_eq!(result.score, 97);
    }

    #[test]
    fn test_details_capped_at_ten() {
        let images: Vec<_> = (0..25)
            .map(|i| image(&format!("/m/{i}.png"), None, false, None))
            .collect();
        let result = analyze_images(&images, "https://example.com/");
        let details = result.detail("images").and_then(Value::as_array).unwrap();
        assert_eq!(details.len(), MAX_IMAGE_DETAILS);
        // 100 - 15 - 10 - 7 - 5
        assert_eq!(result.score, 63);
        // (25 - 25 - 25) / 25
        assert_eq!(result.metric("optimizationRate"), Some(&json!(-100.0)));
    }

    #[test]
    fn test_optimization_rate_counts_each_category() {
        let images = vec![image("a.webp", None, false, None)];
        let result = analyze_images(&images, "https://example.com/");
        assert_eq!(result.metric("optimizationRate"), Some(&json!(-100.0)));

        let images = vec![
            image("a.webp", Some(" "), true, None),
            image("b.webp", Some("b"), true, None),
        ];
        let result = analyze_images(&images, "https://example.com/");
        assert_eq!(result.metric("optimizationRate"), Some(&json!(50.0)));
    }

    #[test]
    fn test_clean_images_have_no_details() {
        let images = vec![image("/m/red-shoes.webp", Some("Red shoes"), true, None)];
        let result = analyze_images(&images, "https://example.com/");
        assert_eq!(result.score, 100);
        let details = result.detail("images").and_then(Value::as_array).unwrap();
        assert!(details.is_empty());
        assert_eq!(result.metric("optimizationRate"), Some(&json!(100.0)));
    }

    #[test]
    fn test_is_legacy_format() {
        assert!(is_legacy_format("a.jpg"));
        assert!(is_legacy_format("https://cdn.example.com/a.JPEG?w=300"));
        assert!(is_legacy_format("/x/y/z.gif#frame"));
        assert!(!is_legacy_format("a.webp"));
        assert!(!is_legacy_format("a.svg"));
        assert!(!is_legacy_format("https://example.com/image"));
        assert!(!is_legacy_format("https://cdn.example.jpg/asset"));
    }

    #[test]
    fn test_is_generic_filename() {
        assert!(is_generic_filename("image.png"));
        assert!(is_generic_filename("/uploads/IMG123.JPG"));
        assert!(is_generic_filename("photo2.webp?x=1"));
        assert!(is_generic_filename("picture.svg"));
        assert!(is_generic_filename("pic.gif"));
        assert!(!is_generic_filename("red-shoes.jpg"));
        assert!(!is_generic_filename("image-of-shoes.jpg"));
        assert!(!is_generic_filename("image.txt"));
        assert!(!is_generic_filename("image"));
    }

    #[test]
    fn test_from_element_prefers_src_then_data_src() {
        let element = Element::new(
            "img",
            vec![
                ("src".to_string(), "".to_string()),
                ("data-src".to_string(), "/lazy.webp".to_string()),
                ("alt".to_string(), "".to_string()),
            ],
            "",
        );
        let image = ImageElement::from_element(&element);
        assert_eq!(image.src.as_deref(), Some("/lazy.webp"));
        assert_eq!(image.alt.as_deref(), Some(""));
        assert!(image.width.is_none());
    }
}
