//! Result types shared by every analyzer.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::EnumIter;

use crate::config::MAX_SCORE;

/// Severity of an issue.
///
/// Ordered from least to most severe so callers can sort with `Ord`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected deficiency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    priority: Priority,
    category: String,
    issue: String,
    recommendation: String,
}

impl Issue {
    pub fn new(
        priority: Priority,
        category: impl Into<String>,
        issue: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            priority,
            category: category.into(),
            issue: issue.into(),
            recommendation: recommendation.into(),
        }
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Human-readable description of the problem.
    pub fn description(&self) -> &str {
        &self.issue
    }

    pub fn recommendation(&self) -> &str {
        &self.recommendation
    }
}

/// Uniform output of an analyzer.
///
/// `details` holds analyzer-specific top-level facts (for example the readability
/// grade or the Open Graph summary) and is flattened into the serialized object.
/// `metrics` holds named numeric and string measurements. Both maps iterate in
/// key order, so serialization is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: u8,
    #[serde(flatten)]
    pub details: Map<String, Value>,
    pub metrics: Map<String, Value>,
    pub issues: Vec<Issue>,
    pub recommendations: Vec<String>,
}

impl AnalysisResult {
    /// Looks up an analyzer-specific top-level fact.
    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.get(key)
    }

    /// Looks up a named metric.
    pub fn metric(&self, key: &str) -> Option<&Value> {
        self.metrics.get(key)
    }

    /// Convenience accessor for integer metrics.
    pub fn metric_u64(&self, key: &str) -> Option<u64> {
        self.metrics.get(key).and_then(Value::as_u64)
    }

    /// Whether any issue has the given category.
    pub fn has_issue(&self, category: &str) -> bool {
        self.issues.iter().any(|issue| issue.category() == category)
    }
}

/// The analyzers a report can include, in report order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerKind {
    /// Title, description, headings, HTTPS, viewport
    Meta,
    /// Image accessibility and performance attributes
    Images,
    /// Internal link structure and anchor text
    Links,
    /// Flesch reading ease and content length
    Readability,
    /// Open Graph and Twitter Card tags
    Social,
}

impl AnalyzerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyzerKind::Meta => "meta",
            AnalyzerKind::Images => "images",
            AnalyzerKind::Links => "links",
            AnalyzerKind::Readability => "readability",
            AnalyzerKind::Social => "social",
        }
    }
}

impl std::fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accumulates deductions, issues, and recommendations for one analyzer run.
#[derive(Debug)]
pub(crate) struct Scorecard {
    score: i32,
    issues: Vec<Issue>,
    recommendations: Vec<String>,
}

impl Scorecard {
    pub(crate) fn new() -> Self {
        Self {
            score: MAX_SCORE,
            issues: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    /// Records an issue and subtracts `points` from the score.
    pub(crate) fn penalize(&mut self, points: i32, issue: Issue) {
        self.score -= points;
        self.issues.push(issue);
    }

    /// Like [`Scorecard::penalize`], also repeating the issue's fix as a recommendation.
    pub(crate) fn penalize_with_advice(&mut self, points: i32, issue: Issue) {
        self.recommendations.push(issue.recommendation().to_string());
        self.penalize(points, issue);
    }

    /// Records an issue that does not affect the score.
    pub(crate) fn flag(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Subtracts `points` without recording an issue.
    pub(crate) fn deduct(&mut self, points: i32) {
        self.score -= points;
    }

    pub(crate) fn recommend(&mut self, recommendation: impl Into<String>) {
        self.recommendations.push(recommendation.into());
    }

    pub(crate) fn finish(self, metrics: Map<String, Value>, details: Map<String, Value>) -> AnalysisResult {
        AnalysisResult {
            score: clamp_score(self.score),
            details,
            metrics,
            issues: self.issues,
            recommendations: self.recommendations,
        }
    }
}

/// Clamps a raw score into `0..=100`.
pub(crate) fn clamp_score(score: i32) -> u8 {
    score.clamp(0, MAX_SCORE) as u8
}

/// Unwraps a `json!` object literal into a map.
pub(crate) fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
