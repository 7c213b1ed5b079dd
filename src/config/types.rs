//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use strum::IntoEnumIterator;

use crate::analysis::AnalyzerKind;
use crate::config::constants::{DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Report output format written to stdout.
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON report (default)
    Json,
    /// Colored human-readable summary
    Text,
}

/// Audit configuration.
///
/// Parsed from the command line by the binary, or constructed programmatically
/// by library callers.
///
/// # Examples
///
/// ```no_run
/// use seo_audit::Config;
///
/// let config = Config {
///     url: "https://example.com/".to_string(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seo_audit",
    version,
    about = "Audits a single web page against SEO heuristics"
)]
pub struct Config {
    /// URL of the page to audit (also used as the canonical URL for --html-file)
    pub url: String,

    /// Analyze markup read from this file instead of fetching the URL
    #[arg(long, value_name = "FILE")]
    pub html_file: Option<PathBuf>,

    /// Analyzers to run, comma separated (default: all)
    #[arg(long = "analyzer", value_enum, value_delimiter = ',')]
    pub analyzers: Vec<AnalyzerKind>,

    /// Report output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Maximum number of redirects to follow
    #[arg(long, default_value_t = DEFAULT_MAX_REDIRECTS)]
    pub max_redirects: usize,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl Config {
    /// Analyzers selected for this run, in report order. An empty selection means all.
    pub fn selected_analyzers(&self) -> Vec<AnalyzerKind> {
        if self.analyzers.is_empty() {
            return AnalyzerKind::iter().collect();
        }
        let mut selected = self.analyzers.clone();
        selected.sort();
        selected.dedup();
        selected
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: String::new(),
            html_file: None,
            analyzers: Vec::new(),
            format: OutputFormat::Json,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
