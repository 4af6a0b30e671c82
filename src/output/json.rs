//! JSON output formatter.
//!
//! Produces a pretty-printed JSON document with a per-kind summary and the
//! findings of every audited repository.

use crate::finding::{Finding, Report, ResultKind};

#[derive(serde::Serialize)]
struct JsonOutput<'a> {
    tool_version: &'static str,
    audit_timestamp: String,
    worst: ResultKind,
    summary: Summary,
    repos: Vec<JsonRepo<'a>>,
}

#[derive(serde::Serialize)]
struct Summary {
    good: usize,
    info: usize,
    unknown: usize,
    caution: usize,
    warning: usize,
    danger: usize,
}

#[derive(serde::Serialize)]
struct JsonRepo<'a> {
    repo: &'a str,
    worst: ResultKind,
    findings: &'a [Finding],
}

/// Formats a [`Report`] as pretty-printed JSON.
///
/// # Panics
///
/// Panics if the report cannot be serialized (should not happen with valid data).
pub fn format(report: &Report) -> String {
    let mut summary = Summary {
        good: 0,
        info: 0,
        unknown: 0,
        caution: 0,
        warning: 0,
        danger: 0,
    };
    for (kind, count) in report.count_by_kind() {
        let slot = match kind {
            ResultKind::Good => &mut summary.good,
            ResultKind::Info => &mut summary.info,
            ResultKind::Unknown => &mut summary.unknown,
            ResultKind::Caution => &mut summary.caution,
            ResultKind::Warning => &mut summary.warning,
            ResultKind::Danger => &mut summary.danger,
        };
        *slot = count;
    }

    let output = JsonOutput {
        tool_version: env!("CARGO_PKG_VERSION"),
        audit_timestamp: chrono::Utc::now().to_rfc3339(),
        worst: report.worst_kind(),
        summary,
        repos: report
            .repos
            .iter()
            .map(|r| JsonRepo {
                repo: &r.repo,
                worst: r.worst_kind(),
                findings: &r.findings,
            })
            .collect(),
    };

    serde_json::to_string_pretty(&output).expect("JSON serialization failed")
}
