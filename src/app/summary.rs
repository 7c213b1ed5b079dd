//! Human-readable report rendering.

use colored::*;
use log::info;
use std::fmt::Write;

use crate::analysis::Priority;
use crate::report::{AuditOutcome, AuditReport, FailedReport};

fn colored_score(score: u8) -> ColoredString {
    let text = format!("{score:>3}");
    match score {
        80..=100 => text.green(),
        50..=79 => text.yellow(),
        _ => text.red(),
    }
}

fn colored_priority(priority: Priority) -> ColoredString {
    let text = format!("{:<8}", priority.as_str());
    match priority {
        Priority::Critical => text.red().bold(),
        Priority::High => text.red(),
        Priority::Medium => text.yellow(),
        Priority::Low => text.normal(),
    }
}

fn render_report(report: &AuditReport, out: &mut String) -> std::fmt::Result {
    writeln!(out, "{} {}", "SEO audit for".bold(), report.url)?;
    writeln!(out)?;
    writeln!(out, "{}", "Scores".bold())?;
    for (kind, result) in &report.results {
        writeln!(out, "  {:<12} {}", kind.as_str(), colored_score(result.score))?;
    }

    let issues = report.issues_by_priority();
    writeln!(out)?;
    if issues.is_empty() {
        writeln!(out, "{}", "No issues found".green())?;
        return Ok(());
    }
    writeln!(out, "{} ({})", "Issues".bold(), issues.len())?;
    for (kind, issue) in issues {
        writeln!(
            out,
            "  {} {:<12} {}",
            colored_priority(issue.priority()),
            kind.as_str(),
            issue.description()
        )?;
        writeln!(out, "           {} {}", "->".dimmed(), issue.recommendation())?;
    }
    Ok(())
}

fn render_failure(failed: &FailedReport, out: &mut String) -> std::fmt::Result {
    writeln!(
        out,
        "{} {} ({}): {}",
        "Audit failed for".red().bold(),
        failed.url,
        failed.kind,
        failed.message
    )
}

/// Renders an audit outcome as a plain-text summary with ANSI colors.
pub fn render_summary(outcome: &AuditOutcome) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = match outcome {
        AuditOutcome::Completed(report) => render_report(report, &mut out),
        AuditOutcome::Failed(failed) => render_failure(failed, &mut out),
    };
    out
}

/// Logs a one-line summary of an audit outcome.
pub fn log_summary(outcome: &AuditOutcome) {
    match outcome {
        AuditOutcome::Completed(report) => {
            let scores: Vec<String> = report
                .results
                .iter()
                .map(|(kind, result)| format!("{kind}={}", result.score))
                .collect();
            info!(
                "✅ Audited {} with {} analyzer{} ({} issue{}): {}",
                report.url,
                report.results.len(),
                if report.results.len() == 1 { "" } else { "s" },
                report.issue_count(),
                if report.issue_count() == 1 { "" } else { "s" },
                scores.join(", ")
            );
        }
        AuditOutcome::Failed(failed) => {
            info!("Audit of {} failed ({}): {}", failed.url, failed.kind, failed.message);
        }
    }
}
