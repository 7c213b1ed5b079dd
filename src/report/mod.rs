//! Report aggregation.
//!
//! Runs a selection of analyzers against one parsed document and collects
//! their results keyed by analyzer. There is no composite score: each analyzer
//! score stands on its own and callers decide how to weigh them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::analysis::{
    analyze_images, analyze_links, analyze_page_meta, analyze_social, images_from_document,
    links_from_document, page_meta_from_document, readability_from_document,
    social_tags_from_document, AnalysisResult, AnalyzerKind, Issue,
};
use crate::document::{DocumentQuery, HtmlDocument};
use crate::error_handling::FetchError;

/// Results of auditing one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    /// The page URL the analyzers were run against (after redirects, if fetched).
    pub url: String,
    /// One result per selected analyzer, in [`AnalyzerKind`] order.
    pub results: BTreeMap<AnalyzerKind, AnalysisResult>,
}

impl AuditReport {
    /// The result for `kind`, if that analyzer was selected.
    pub fn result(&self, kind: AnalyzerKind) -> Option<&AnalysisResult> {
        self.results.get(&kind)
    }

    /// Every issue across all analyzers, most severe first.
    ///
    /// The sort is stable: issues of equal priority keep analyzer order, then
    /// each analyzer's own check order.
    pub fn issues_by_priority(&self) -> Vec<(AnalyzerKind, &Issue)> {
        let mut issues: Vec<(AnalyzerKind, &Issue)> = self
            .results
            .iter()
            .flat_map(|(kind, result)| result.issues.iter().map(move |issue| (*kind, issue)))
            .collect();
        issues.sort_by(|a, b| b.1.priority().cmp(&a.1.priority()));
        issues
    }

    /// Total number of issues across all analyzers.
    pub fn issue_count(&self) -> usize {
        self.results.values().map(|result| result.issues.len()).sum()
    }
}

/// Why a page could not be audited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedReport {
    pub url: String,
    /// Machine-readable failure kind (`timeout`, `http_status`, `network`).
    pub kind: String,
    pub message: String,
}

impl FailedReport {
    pub fn from_fetch_error(url: &str, error: &FetchError) -> Self {
        Self {
            url: url.to_string(),
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}

/// Outcome of an audit run: either a full report or a structured failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AuditOutcome {
    Completed(AuditReport),
    Failed(FailedReport),
}

/// Runs one analyzer against a document.
pub fn run_analyzer<D: DocumentQuery + ?Sized>(
    kind: AnalyzerKind,
    document: &D,
    page_url: &str,
) -> AnalysisResult {
    match kind {
        AnalyzerKind::Meta => analyze_page_meta(&page_meta_from_document(document, page_url)),
        AnalyzerKind::Images => analyze_images(&images_from_document(document), page_url),
        AnalyzerKind::Links => analyze_links(&links_from_document(document), page_url),
        AnalyzerKind::Readability => readability_from_document(document),
        AnalyzerKind::Social => analyze_social(&social_tags_from_document(document)),
    }
}

/// Runs the selected analyzers against an already parsed document.
///
/// Duplicate kinds in `analyzers` are run once.
pub fn audit_document<D: DocumentQuery + ?Sized>(
    document: &D,
    page_url: &str,
    analyzers: &[AnalyzerKind],
) -> AuditReport {
    let mut results = BTreeMap::new();
    for &kind in analyzers {
        if results.contains_key(&kind) {
            continue;
        }
        let result = run_analyzer(kind, document, page_url);
        log::debug!("Analyzer {kind} scored {} for {page_url}", result.score);
        results.insert(kind, result);
    }
    AuditReport {
        url: page_url.to_string(),
        results,
    }
}

/// Parses `markup` and runs the selected analyzers against it.
pub fn audit_markup(markup: &str, page_url: &str, analyzers: &[AnalyzerKind]) -> AuditReport {
    let document = HtmlDocument::parse(markup);
    audit_document(&document, page_url, analyzers)
}
