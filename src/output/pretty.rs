//! Human-readable text formatter.
//!
//! [`render_finding`] is used by the [`ResultLogger`](crate::logger::ResultLogger)
//! to emit each finding as it is recorded; [`format_summary`] renders the
//! per-repository table printed after a run.

use crate::finding::{Finding, Report, ResultKind};
use colored::Colorize;

/// Leading spaces per indentation level.
pub const INDENT_UNIT: &str = "   ";

/// Renders a finding and its children starting at `depth`.
///
/// Children are rendered one level deeper. When `top_level` is set a blank
/// line is appended after the whole block.
pub fn render_finding(finding: &Finding, depth: usize, top_level: bool) -> String {
    let mut out = String::new();
    push_finding(&mut out, finding, depth);
    if top_level {
        out.push('\n');
    }
    out
}

fn push_finding(out: &mut String, finding: &Finding, depth: usize) {
    let indent = INDENT_UNIT.repeat(depth);

    out.push_str(&format!("{indent}{} {}\n", finding.kind.glyph(), finding.message));
    if let Some(ref details) = finding.details {
        out.push_str(&format!("{indent}{details}\n"));
    }
    // A remediation link is meaningless for a passing check.
    if let Some(ref url) = finding.resolve_url {
        if finding.kind.is_issue() {
            out.push_str(&format!("{indent}(Resolve issues at {url})\n"));
        }
    }
    if let Some(ref url) = finding.docs_url {
        out.push_str(&format!("{indent}(Docs: {url})\n"));
    }
    for child in &finding.children {
        push_finding(out, child, depth + 1);
    }
}

/// Renders the separator printed before a repository's findings.
pub fn format_repo_header(repo: &str) -> String {
    format!("{}\n\n", format!("======== {repo} ========").bold())
}

/// Renders a compact table of the worst outcome and per-kind counts for each
/// audited repository.
pub fn format_summary(report: &Report) -> String {
    let mut out = String::new();
    let separator = "─".repeat(54);

    out.push_str(&format!(
        "{}\n",
        format!("  Summary  ({} repositories)", report.repos.len())
            .bold()
            .underline()
    ));
    out.push_str(&format!("{}\n", separator.dimmed()));

    for entry in &report.repos {
        let worst = entry.worst_kind();
        let status = match worst {
            ResultKind::Danger => "ISSUES  ".red().bold().to_string(),
            ResultKind::Warning | ResultKind::Caution | ResultKind::Unknown => {
                "POSSIBLE".yellow().bold().to_string()
            }
            ResultKind::Good | ResultKind::Info => "OK      ".green().bold().to_string(),
        };
        let count = |kind: ResultKind| entry.findings.iter().filter(|f| f.kind == kind).count();
        out.push_str(&format!(
            "  {glyph} {name:<32} {status}  {d} danger, {w} warning, {c} caution, {u} unknown\n",
            glyph = worst.glyph(),
            name = entry.repo,
            d = count(ResultKind::Danger),
            w = count(ResultKind::Warning),
            c = count(ResultKind::Caution),
            u = count(ResultKind::Unknown),
        ));
    }

    out.push_str(&format!("{}\n", separator.dimmed()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::Details;

    #[test]
    fn resolve_url_hidden_for_good_and_info() {
        for kind in [ResultKind::Good, ResultKind::Info] {
            let finding = Finding::with_details(
                kind,
                "fine",
                Details::new().resolve_url("https://example.com/fix"),
            );
            let text = render_finding(&finding, 0, true);
            assert!(!text.contains("Resolve issues"), "{kind}: {text}");
        }
    }

    #[test]
    fn resolve_url_shown_for_issues() {
        let finding = Finding::with_details(
            ResultKind::Unknown,
            "odd",
            Details::new().resolve_url("https://example.com/fix"),
        );
        let text = render_finding(&finding, 0, true);
        assert!(text.contains("(Resolve issues at https://example.com/fix)"));
    }

    #[test]
    fn docs_url_shown_regardless_of_kind() {
        let finding = Finding::with_details(
            ResultKind::Good,
            "fine",
            Details::new().docs_url("https://docs.example.com"),
        );
        let text = render_finding(&finding, 0, false);
        assert_eq!(text, "✅ fine\n(Docs: https://docs.example.com)\n");
    }

    #[test]
    fn children_indent_one_level_deeper() {
        let finding = Finding::with_details(
            ResultKind::Warning,
            "parent",
            Details::new()
                .details("about the parent")
                .children(vec![Finding::with_details(
                    ResultKind::Info,
                    "child",
                    Details::new().details("about the child"),
                )]),
        );
        let text = render_finding(&finding, 1, true);
        let expected = "   ❗️ parent\n   about the parent\n      •  child\n      about the child\n\n";
        assert_eq!(text, expected);
    }
}
