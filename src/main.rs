//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `seo_audit` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.
//!
//! Exit codes: 0 when the page was audited, 1 on invalid input or setup
//! failure, 2 when the page could not be fetched.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use seo_audit::app::render_summary;
use seo_audit::initialization::init_logger_with;
use seo_audit::{run_audit, AuditOutcome, Config, OutputFormat};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into Config
    let config = Config::parse();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let outcome = match run_audit(&config).await {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("seo_audit error: {:#}", e);
            process::exit(1);
        }
    };

    match config.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&outcome).context("Failed to serialize report")?;
            println!("{json}");
        }
        OutputFormat::Text => print!("{}", render_summary(&outcome)),
    }

    if matches!(outcome, AuditOutcome::Failed(_)) {
        process::exit(2);
    }
    Ok(())
}
