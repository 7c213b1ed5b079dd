//! Content readability scoring.
//!
//! Computes the Flesch Reading Ease of the page's body text and checks content
//! length, sentence length, and sentence variety.

use regex::Regex;
use serde_json::{json, Map, Value};
use std::sync::LazyLock;

use super::types::{object, AnalysisResult, Issue, Priority};
use crate::config::{
    COMPREHENSIVE_WORD_COUNT, MAX_AVG_WORDS_PER_SENTENCE, MIN_WORD_COUNT, SHORT_SENTENCE_WORDS,
};
use crate::document::DocumentQuery;
use crate::utils::round_to;

const CATEGORY: &str = "Content";

/// Everything except word characters, whitespace, and sentence terminators.
const NON_TEXT_PATTERN: &str = r"[^\w\s.!?]";
const WHITESPACE_PATTERN: &str = r"\s+";
const SENTENCE_TERMINATOR_PATTERN: &str = r"[.!?]+";
const VOWEL_GROUP_PATTERN: &str = r"[aeiouy]+";
const PARAGRAPH_BREAK_PATTERN: &str = r"\n\s*\n";

const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?'];

fn compile_regex_unsafe(pattern: &str, context: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}' in {}: {}. This is a programming error.",
            pattern, context, e
        )
    })
}

static NON_TEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(NON_TEXT_PATTERN, "NON_TEXT_RE"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(WHITESPACE_PATTERN, "WHITESPACE_RE"));
static SENTENCE_TERMINATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(SENTENCE_TERMINATOR_PATTERN, "SENTENCE_TERMINATOR_RE")
});
static VOWEL_GROUP_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(VOWEL_GROUP_PATTERN, "VOWEL_GROUP_RE"));
static PARAGRAPH_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(PARAGRAPH_BREAK_PATTERN, "PARAGRAPH_BREAK_RE"));

/// A reading-ease band: lower bound, labels, and the issue it raises, if any.
struct ReadingBand {
    min_score: f64,
    grade: &'static str,
    reading_level: &'static str,
    seo_impact: &'static str,
    issue: Option<(Priority, &'static str)>,
}

const READING_BANDS: &[ReadingBand] = &[
    ReadingBand {
        min_score: 90.0,
        grade: "Very Easy",
        reading_level: "5th grade",
        seo_impact: "Excellent",
        issue: None,
    },
    ReadingBand {
        min_score: 80.0,
        grade: "Easy",
        reading_level: "6th grade",
        seo_impact: "Very Good",
        issue: None,
    },
    ReadingBand {
        min_score: 70.0,
        grade: "Fairly Easy",
        reading_level: "7th grade",
        seo_impact: "Good",
        issue: None,
    },
    ReadingBand {
        min_score: 60.0,
        grade: "Standard",
        reading_level: "8th-9th grade",
        seo_impact: "Fair",
        issue: None,
    },
    ReadingBand {
        min_score: 50.0,
        grade: "Fairly Difficult",
        reading_level: "10th-12th grade",
        seo_impact: "Below Average",
        issue: Some((
            Priority::Medium,
            "Content is fairly difficult to read for a general audience",
        )),
    },
    ReadingBand {
        min_score: 30.0,
        grade: "Difficult",
        reading_level: "College",
        seo_impact: "Poor",
        issue: Some((Priority::High, "Content is difficult to read")),
    },
    ReadingBand {
        min_score: f64::NEG_INFINITY,
        grade: "Very Difficult",
        reading_level: "College graduate",
        seo_impact: "Very Poor",
        issue: Some((Priority::High, "Content is very difficult to read")),
    },
];

fn reading_band(score: f64) -> &'static ReadingBand {
    READING_BANDS
        .iter()
        .find(|band| score >= band.min_score)
        .unwrap_or(&READING_BANDS[READING_BANDS.len() - 1])
}

/// Counts the syllables of a single word.
///
/// Words of up to three letters are one syllable. Longer words count vowel
/// groups, minus one for a trailing silent `e` and one for a trailing `es` or
/// `ed`, with a minimum of one.
pub fn count_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    if word.chars().count() <= 3 {
        return 1;
    }
    let mut count = VOWEL_GROUP_RE.find_iter(&word).count() as i64;
    if word.ends_with('e') {
        count -= 1;
    }
    if word.ends_with("es") || word.ends_with("ed") {
        count -= 1;
    }
    count.max(1) as usize
}

/// Flesch Reading Ease, clamped to `0..=100`.
///
/// Callers must guarantee `words > 0` and `sentences > 0`.
fn flesch_reading_ease(words: usize, sentences: usize, syllables: usize) -> f64 {
    let words_per_sentence = words as f64 / sentences as f64;
    let syllables_per_word = syllables as f64 / words as f64;
    (206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word).clamp(0.0, 100.0)
}

fn count_paragraphs(text: &str) -> usize {
    PARAGRAPH_BREAK_RE
        .split(text)
        .filter(|block| !block.trim().is_empty())
        .count()
}

/// Analyzes the readability of `text`.
pub fn analyze_readability(text: &str) -> AnalysisResult {
    if text.trim().is_empty() {
        log::debug!("Readability: no content");
        return no_content_result();
    }

    let paragraph_count = count_paragraphs(text);
    let normalized = WHITESPACE_RE.replace_all(text.trim(), " ");
    let cleaned = NON_TEXT_RE.replace_all(&normalized, "");

    let sentences: Vec<&str> = SENTENCE_TERMINATOR_RE
        .split(&cleaned)
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .collect();
    let words: Vec<&str> = cleaned
        .split_whitespace()
        .map(|token| token.trim_matches(SENTENCE_TERMINATORS))
        .filter(|word| !word.is_empty())
        .collect();

    if sentences.is_empty() || words.is_empty() {
        log::debug!(
            "Readability: insufficient content ({} words, {} sentences)",
            words.len(),
            sentences.len()
        );
        return insufficient_content_result(words.len(), sentences.len(), paragraph_count);
    }

    let word_count = words.len();
    let sentence_count = sentences.len();
    let syllable_count: usize = words.iter().map(|word| count_syllables(word)).sum();
    let avg_words_per_sentence = word_count as f64 / sentence_count as f64;
    let avg_syllables_per_word = syllable_count as f64 / word_count as f64;
    let short_sentences = sentences
        .iter()
        .filter(|sentence| sentence.split_whitespace().count() < SHORT_SENTENCE_WORDS)
        .count();

    let flesch = flesch_reading_ease(word_count, sentence_count, syllable_count);
    let band = reading_band(flesch);
    let score = flesch.round() as u8;

    let mut issues = Vec::new();
    if let Some((priority, description)) = band.issue {
        issues.push(Issue::new(
            priority,
            CATEGORY,
            format!("{description} (Flesch reading ease {:.1})", flesch),
            "Use shorter sentences and simpler words to reach a reading ease of 60 or higher",
        ));
    }
    if word_count < MIN_WORD_COUNT {
        issues.push(Issue::new(
            Priority::High,
            CATEGORY,
            format!("Thin content: only {word_count} words"),
            format!("Expand the page to at least {MIN_WORD_COUNT} words of useful content"),
        ));
    } else if word_count < COMPREHENSIVE_WORD_COUNT {
        issues.push(Issue::new(
            Priority::Low,
            CATEGORY,
            format!("Content length is moderate ({word_count} words)"),
            format!(
                "Consider expanding content toward {COMPREHENSIVE_WORD_COUNT}+ words for comprehensive coverage"
            ),
        ));
    }
    if avg_words_per_sentence > MAX_AVG_WORDS_PER_SENTENCE {
        issues.push(Issue::new(
            Priority::Medium,
            CATEGORY,
            format!(
                "Sentences are too long (average {:.1} words per sentence)",
                avg_words_per_sentence
            ),
            "Split long sentences; aim for 15-20 words per sentence",
        ));
    }
    if short_sentences * 2 > sentence_count {
        issues.push(Issue::new(
            Priority::Low,
            CATEGORY,
            format!(
                "Choppy writing: {short_sentences} of {sentence_count} sentences have fewer than {SHORT_SENTENCE_WORDS} words"
            ),
            "Combine very short sentences to improve flow",
        ));
    }

    let mut recommendations = Vec::new();
    if flesch < 60.0 {
        recommendations
            .push("Shorten sentences and prefer common words over jargon".to_string());
        if flesch < 30.0 {
            recommendations.push(
                "Rewrite dense passages for a general audience and define technical terms"
                    .to_string(),
            );
        }
    } else {
        recommendations
            .push("Maintain the current reading level; it suits a broad audience".to_string());
    }
    if word_count < MIN_WORD_COUNT {
        recommendations.push(format!(
            "Add more content: pages with at least {MIN_WORD_COUNT} words tend to rank better"
        ));
    } else if word_count < COMPREHENSIVE_WORD_COUNT {
        recommendations.push(format!(
            "Consider expanding to {COMPREHENSIVE_WORD_COUNT}+ words to cover the topic in depth"
        ));
    }
    push_structural_recommendations(&mut recommendations);

    log::debug!(
        "Readability: {word_count} words, {sentence_count} sentences, {syllable_count} syllables, flesch {flesch:.1}, score {score}"
    );

    AnalysisResult {
        score,
        details: band_details(band.grade, band.reading_level, band.seo_impact),
        metrics: object(json!({
            "wordCount": word_count,
            "sentenceCount": sentence_count,
            "syllableCount": syllable_count,
            "avgWordsPerSentence": round_to(avg_words_per_sentence, 1),
            "avgSyllablesPerWord": round_to(avg_syllables_per_word, 2),
            "paragraphCount": paragraph_count,
            "fleschReadingEase": round_to(flesch, 1),
        })),
        issues,
        recommendations,
    }
}

/// Analyzes the readability of the document's visible body text.
pub fn readability_from_document<D: DocumentQuery + ?Sized>(document: &D) -> AnalysisResult {
    analyze_readability(&document.body_text())
}

fn push_structural_recommendations(recommendations: &mut Vec<String>) {
    recommendations.push("Add a subheading (H2/H3) every 200-300 words".to_string());
    recommendations.push("Use bulleted or numbered lists to make key points scannable".to_string());
}

fn band_details(grade: &str, reading_level: &str, seo_impact: &str) -> Map<String, Value> {
    object(json!({
        "grade": grade,
        "readingLevel": reading_level,
        "seoImpact": seo_impact,
    }))
}

fn zero_metrics(word_count: usize, sentence_count: usize, paragraph_count: usize) -> Map<String, Value> {
    object(json!({
        "wordCount": word_count,
        "sentenceCount": sentence_count,
        "syllableCount": 0,
        "avgWordsPerSentence": 0.0,
        "avgSyllablesPerWord": 0.0,
        "paragraphCount": paragraph_count,
        "fleschReadingEase": 0.0,
    }))
}

fn no_content_result() -> AnalysisResult {
    AnalysisResult {
        score: 0,
        details: band_details("No content", "N/A", "Critical"),
        metrics: zero_metrics(0, 0, 0),
        issues: vec![Issue::new(
            Priority::Critical,
            CATEGORY,
            "No readable content found on the page",
            format!("Add at least {MIN_WORD_COUNT} words of original, relevant content"),
        )],
        recommendations: vec![format!(
            "Add at least {MIN_WORD_COUNT} words of original, relevant content"
        )],
    }
}

fn insufficient_content_result(
    word_count: usize,
    sentence_count: usize,
    paragraph_count: usize,
) -> AnalysisResult {
    AnalysisResult {
        score: 0,
        details: band_details("Insufficient content", "N/A", "Very Poor"),
        metrics: zero_metrics(word_count, sentence_count, paragraph_count),
        issues: vec![Issue::new(
            Priority::High,
            CATEGORY,
            "Content has no complete words or sentences to evaluate",
            format!("Write at least {MIN_WORD_COUNT} words in complete sentences"),
        )],
        recommendations: vec![format!(
            "Write at least {MIN_WORD_COUNT} words in complete sentences"
        )],
    }
}
