//! Output formatting for audit reports.
//!
//! Two formats are supported:
//!
//! | Format | Module | Use case |
//! |--------|--------|----------|
//! | [`Pretty`](OutputFormat::Pretty) | [`pretty`] | Terminal / human review |
//! | [`Json`](OutputFormat::Json)     | [`json`]   | Automation / scripting  |
//!
//! Pretty output is streamed by the [`ResultLogger`](crate::logger::ResultLogger)
//! while the audit runs; [`format_report`] renders what comes after it.

pub mod json;
pub mod pretty;

use crate::finding::Report;

/// Supported output formats for audit reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text, streamed as each check completes.
    Pretty,
    /// Machine-readable JSON, written once the run completes.
    Json,
}

/// Renders the end-of-run output for a [`Report`] in the requested format:
/// the summary table for [`Pretty`](OutputFormat::Pretty), the full document
/// for [`Json`](OutputFormat::Json).
///
/// # Examples
///
/// ```rust,no_run
/// use secure_repo::output::{format_report, OutputFormat};
/// # use secure_repo::finding::Report;
/// # fn example(report: &Report) {
/// let json = format_report(report, OutputFormat::Json);
/// println!("{json}");
/// # }
/// ```
pub fn format_report(report: &Report, format: OutputFormat) -> String {
    match format {
        OutputFormat::Pretty => pretty::format_summary(report),
        OutputFormat::Json => json::format(report),
    }
}
