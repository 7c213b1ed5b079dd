//! Configuration constants.
//!
//! This module defines the constants used throughout the application: fetch
//! timeouts and limits, and the thresholds and deduction caps each analyzer
//! scores against.

// Fetching
/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Maximum number of redirects followed before the fetch fails
pub const DEFAULT_MAX_REDIRECTS: usize = 10;
/// Maximum URL length (2048 characters), matching common browser and server limits
pub const MAX_URL_LENGTH: usize = 2048;
/// Maximum response body size in bytes (2MB)
/// Larger responses fail the fetch instead of being buffered and parsed
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Retry strategy
/// Initial delay in milliseconds before the first retry
pub const RETRY_INITIAL_DELAY_MS: u64 = 500;
/// Backoff multiplier applied after each retry
pub const RETRY_FACTOR: u64 = 2;
/// Upper bound on a single retry delay in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 5;
/// Number of retries after the initial attempt
pub const RETRY_MAX_ATTEMPTS: usize = 2;

// Scores
/// Every analyzer starts from this score and subtracts penalties
pub const MAX_SCORE: i32 = 100;

// Readability
/// Minimum recommended word count for a content page
pub const MIN_WORD_COUNT: usize = 300;
/// Word count at which content is considered comprehensive
pub const COMPREHENSIVE_WORD_COUNT: usize = 1000;
/// Average sentence length above which sentences are flagged as too long
pub const MAX_AVG_WORDS_PER_SENTENCE: f64 = 25.0;
/// Sentences shorter than this count toward "choppy writing"
pub const SHORT_SENTENCE_WORDS: usize = 5;

// Images
/// Images at an index above this (0-based) are below the fold
pub const FOLD_IMAGE_INDEX: usize = 2;
/// Lazy-loading penalties only apply when the page has more images than this
pub const LAZY_LOAD_MIN_IMAGES: usize = 5;
/// Maximum number of per-image detail records reported
pub const MAX_IMAGE_DETAILS: usize = 10;
pub const MISSING_ALT_PENALTY_CAP: i32 = 15;
pub const EMPTY_ALT_PENALTY_CAP: i32 = 5;
pub const MISSING_DIMENSIONS_PENALTY_CAP: i32 = 10;
pub const LAZY_LOAD_PENALTY_CAP: i32 = 8;
pub const LEGACY_FORMAT_PENALTY_CAP: i32 = 10;

// Internal links
/// Fewer internal links than this is flagged
pub const MIN_INTERNAL_LINKS: usize = 3;
/// More internal links than this is flagged
pub const MAX_INTERNAL_LINKS: usize = 100;
/// Internal links should be at least this share of external links
pub const MIN_INTERNAL_TO_EXTERNAL_SHARE: f64 = 0.3;
/// The internal/external balance check only applies above this many external links
pub const LINK_BALANCE_MIN_EXTERNAL: usize = 5;
/// Anchors longer than this are excluded from the average anchor length
pub const MAX_ANCHOR_LENGTH: usize = 100;
/// Number of most frequent anchor texts reported
pub const TOP_ANCHOR_COUNT: usize = 5;

// Page meta
pub const MIN_TITLE_LENGTH: usize = 10;
pub const MAX_TITLE_LENGTH: usize = 60;
pub const MIN_DESCRIPTION_LENGTH: usize = 50;
pub const MAX_DESCRIPTION_LENGTH: usize = 160;
pub const MISSING_ALT_META_PENALTY_CAP: i32 = 10;
