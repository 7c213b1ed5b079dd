//! End-to-end tests of the analyzer pipeline over fixture markup.
//!
//! These run `audit_markup` on complete HTML documents and check the combined
//! report, without any network access.

use seo_audit::{audit_markup, AnalyzerKind, AuditReport, Priority};
use serde_json::json;
use strum::IntoEnumIterator;

const PAGE_URL: &str = "https://example.com/guides/widgets";

const WELL_OPTIMIZED_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>The complete guide to choosing widgets</title>
  <meta name="description" content="Learn how to pick, install, and maintain widgets for your home workshop with practical tips from experienced makers.">
  <meta name="keywords" content="Widgets, Workshop, Tools">
  <meta property="og:title" content="The complete guide to choosing widgets">
  <meta property="og:description" content="Practical tips for picking and maintaining widgets.">
  <meta property="og:image" content="https://example.com/images/widgets-share.webp">
  <meta property="og:image:width" content="1200">
  <meta property="og:image:height" content="630">
  <meta property="og:url" content="https://example.com/guides/widgets">
  <meta property="og:type" content="article">
  <meta property="og:site_name" content="Example Workshop">
  <meta name="twitter:card" content="summary_large_image">
  <meta name="twitter:site" content="@exampleworkshop">
</head>
<body>
  <nav>
    <a href="/">Workshop home</a>
    <a href="/guides/">All guides</a>
    <a href="https://example.com/guides/gadgets">Gadget buying guide</a>
    <a href="#maintenance">Jump to maintenance</a>
  </nav>
  <main>
    <h1>Choosing widgets</h1>
    <p>A good widget makes the work easy. Pick one that fits your bench.</p>
    <img src="/images/bench-widget.webp" alt="A widget clamped to a bench" width="800" height="600">
    <h2 id="maintenance">Maintenance</h2>
    <p>Clean the widget after use. Oil the joints once a month. Store it dry.</p>
    <img src="/images/oiling.avif" alt="Oiling a widget joint" width="800" height="600">
    <p>Read the <a href="https://makers.example.org/widgets">makers forum</a> for more ideas.</p>
  </main>
</body>
</html>"##;

const NEGLECTED_PAGE: &str = r#"<html>
<head><title>Home</title></head>
<body>
  <h1>Welcome</h1>
  <h1>Also welcome</h1>
  <img src="image1.jpg"><img src="photo.png"><img src="pic2.gif">
  <a href="/about">click here</a>
  <a href="/contact" rel="nofollow"></a>
</body>
</html>"#;

fn all_kinds() -> Vec<AnalyzerKind> {
    AnalyzerKind::iter().collect()
}

fn score(report: &AuditReport, kind: AnalyzerKind) -> u8 {
    report.result(kind).expect("analyzer selected").score
}

#[test]
fn test_well_optimized_page_scores_high() {
    let report = audit_markup(WELL_OPTIMIZED_PAGE, PAGE_URL, &all_kinds());

    assert_eq!(report.results.len(), 5);
    assert_eq!(score(&report, AnalyzerKind::Meta), 100);
    assert_eq!(score(&report, AnalyzerKind::Images), 100);
    assert_eq!(score(&report, AnalyzerKind::Links), 100);
    assert_eq!(score(&report, AnalyzerKind::Social), 100);

    let social = report.result(AnalyzerKind::Social).unwrap();
    assert_eq!(social.detail("hasCompleteSetup"), Some(&json!(true)));
    // Twitter title falls back to og:title
    assert_eq!(
        social.details["twitter"]["title"],
        json!("The complete guide to choosing widgets")
    );

    let links = report.result(AnalyzerKind::Links).unwrap();
    assert_eq!(links.metric_u64("internalLinks"), Some(3));
    assert_eq!(links.metric_u64("externalLinks"), Some(1));
    assert_eq!(links.metric_u64("fragmentLinks"), Some(1));

    let meta = report.result(AnalyzerKind::Meta).unwrap();
    assert_eq!(meta.metric("keywords"), Some(&json!(["widgets", "workshop", "tools"])));
    assert_eq!(meta.metric("firstH1"), Some(&json!("Choosing widgets")));
}

#[test]
fn test_short_content_is_flagged_by_readability() {
    let report = audit_markup(WELL_OPTIMIZED_PAGE, PAGE_URL, &[AnalyzerKind::Readability]);
    let readability = report.result(AnalyzerKind::Readability).unwrap();
    let word_count = readability.metric_u64("wordCount").unwrap();
    assert!(word_count > 0 && word_count < 300);
    assert!(readability
        .issues
        .iter()
        .any(|issue| issue.priority() == Priority::High && issue.category() == "Content"));
}

#[test]
fn test_neglected_page_collects_issues_from_every_analyzer() {
    let report = audit_markup(NEGLECTED_PAGE, "http://example.com/", &all_kinds());

    for (kind, result) in &report.results {
        assert!(result.score <= 100, "{kind} score out of range");
        assert!(!result.issues.is_empty(), "{kind} should report issues");
    }

    // 100 - 5 (short title) - 5 (no description) - 5 (two H1) - 3 (alt) - 10 (http) - 10 (viewport)
    assert_eq!(score(&report, AnalyzerKind::Meta), 62);

    let images = report.result(AnalyzerKind::Images).unwrap();
    assert_eq!(images.metric_u64("missingAlt"), Some(3));
    assert_eq!(images.metric_u64("genericFilenames"), Some(3));

    let links = report.result(AnalyzerKind::Links).unwrap();
    assert_eq!(links.metric_u64("genericAnchors"), Some(1));
    assert_eq!(links.metric_u64("emptyAnchors"), Some(1));
    assert_eq!(links.metric_u64("nofollowInternal"), Some(1));
    assert_eq!(links.metric("internalToExternalRatio"), Some(&json!("N/A")));
}

#[test]
fn test_audit_is_idempotent() {
    let first = audit_markup(NEGLECTED_PAGE, PAGE_URL, &all_kinds());
    let second = audit_markup(NEGLECTED_PAGE, PAGE_URL, &all_kinds());
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_empty_document_yields_well_formed_report() {
    let report = audit_markup("", PAGE_URL, &all_kinds());
    assert_eq!(score(&report, AnalyzerKind::Readability), 0);
    assert_eq!(score(&report, AnalyzerKind::Images), 100);
    assert!(report
        .result(AnalyzerKind::Readability)
        .unwrap()
        .issues
        .iter()
        .any(|issue| issue.priority() == Priority::Critical));
}

#[test]
fn test_malformed_page_url_only_affects_links() {
    let report = audit_markup(WELL_OPTIMIZED_PAGE, "not a url", &all_kinds());
    let links = report.result(AnalyzerKind::Links).unwrap();
    assert_eq!(links.score, 0);
    assert_eq!(links.issues.len(), 1);
    assert!(links.recommendations.is_empty());
    assert_eq!(score(&report, AnalyzerKind::Social), 100);
}

#[test]
fn test_issues_by_priority_starts_with_most_severe() {
    let report = audit_markup(NEGLECTED_PAGE, "http://example.com/", &all_kinds());
    let issues = report.issues_by_priority();
    assert_eq!(issues.len(), report.issue_count());
    assert_eq!(issues[0].1.priority(), Priority::Critical);
    assert_eq!(issues.last().unwrap().1.priority(), Priority::Low);
}
