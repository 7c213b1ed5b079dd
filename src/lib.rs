//! seo_audit library: single-page SEO scoring
//!
//! This library audits the markup of one web page against a fixed set of SEO
//! heuristics. Five independent analyzers (page meta, images, links,
//! readability, social tags) each produce a 0-100 score, an ordered list of
//! issues, recommendations, and named metrics.
//!
//! # Example
//!
//! ```
//! use seo_audit::{audit_markup, AnalyzerKind};
//!
//! let markup = r#"<html><head><title>Widgets and gadgets</title></head>
//!     <body><h1>Widgets</h1><p>All about widgets.</p></body></html>"#;
//! let report = audit_markup(markup, "https://example.com/widgets", &[AnalyzerKind::Meta]);
//! let meta = report.result(AnalyzerKind::Meta).unwrap();
//! assert!(meta.score <= 100);
//! ```
//!
//! [`run_audit`] drives a full run from a [`Config`]: it validates the URL,
//! fetches the page (or reads a local file), and audits it. It requires a Tokio
//! runtime.

pub mod analysis;
pub mod app;
pub mod config;
pub mod document;
pub mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod report;
mod utils;

// Re-export public API
pub use analysis::{AnalysisResult, AnalyzerKind, Issue, Priority};
pub use config::{Config, LogFormat, LogLevel, OutputFormat};
pub use document::{DocumentQuery, Element, HtmlDocument};
pub use error_handling::{FetchError, InitializationError, InputError};
pub use report::{audit_document, audit_markup, AuditOutcome, AuditReport, FailedReport};
pub use run::run_audit;

// Internal run module (contains the audit entry point)
mod run {
    use anyhow::{Context, Result};
    use log::info;

    use crate::app::{log_summary, validate_and_normalize_url};
    use crate::config::Config;
    use crate::error_handling::InputError;
    use crate::fetch::fetch_page;
    use crate::initialization::init_client;
    use crate::report::{audit_markup, AuditOutcome, FailedReport};

    /// Runs one audit with the provided configuration.
    ///
    /// When `config.html_file` is set the markup is read from that file and
    /// `config.url` is only used as the page URL; otherwise the page is fetched.
    /// Fetch failures do not produce an error: they are returned as
    /// [`AuditOutcome::Failed`].
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The URL is empty, malformed, or uses an unsupported scheme
    /// - The markup file cannot be read
    /// - The HTTP client cannot be initialized
    pub async fn run_audit(config: &Config) -> Result<AuditOutcome> {
        let url = validate_and_normalize_url(&config.url)
            .with_context(|| format!("Invalid page URL '{}'", config.url))?;
        let analyzers = config.selected_analyzers();

        let outcome = match &config.html_file {
            Some(path) => {
                info!("Reading markup for {url} from {}", path.display());
                let markup = tokio::fs::read_to_string(path)
                    .await
                    .map_err(InputError::from)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                AuditOutcome::Completed(audit_markup(&markup, &url, &analyzers))
            }
            None => {
                let client = init_client(config).context("Failed to initialize HTTP client")?;
                info!("Fetching {url}");
                match fetch_page(&client, &url).await {
                    Ok(page) => {
                        if page.final_url != url {
                            info!("{url} redirected to {}", page.final_url);
                        }
                        AuditOutcome::Completed(audit_markup(&page.markup, &page.final_url, &analyzers))
                    }
                    Err(e) => AuditOutcome::Failed(FailedReport::from_fetch_error(&url, &e)),
                }
            }
        };

        log_summary(&outcome);
        Ok(outcome)
    }
}
