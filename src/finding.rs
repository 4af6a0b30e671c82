//! Core data types: the severity lattice, findings, and the per-repository report.

use std::fmt;

/// The kind of a [`Finding`], ordered by severity.
///
/// `Good` and `Info` share the lowest rank: both mean "no issue". The order
/// is a total preorder, so [`ResultKind`] deliberately does not implement
/// `Ord`; compare with [`rank`](ResultKind::rank) or use
/// [`worst`](ResultKind::worst).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    /// Setting is secure.
    Good,
    /// Issue should be corrected immediately.
    Danger,
    /// Evaluate the possible issue and strongly consider correcting it.
    Warning,
    /// Changing this setting may enhance security.
    Caution,
    /// Informational point which is less relevant to security.
    Info,
    /// Unexpected result, or failed to check.
    Unknown,
}

impl ResultKind {
    /// Every kind, in declaration order.
    pub const ALL: [ResultKind; 6] = [
        ResultKind::Good,
        ResultKind::Danger,
        ResultKind::Warning,
        ResultKind::Caution,
        ResultKind::Info,
        ResultKind::Unknown,
    ];

    /// Severity rank: `good` = `info` (0) < `unknown` (1) < `caution` (2)
    /// < `warning` (3) < `danger` (4).
    pub fn rank(self) -> u8 {
        match self {
            ResultKind::Good | ResultKind::Info => 0,
            ResultKind::Unknown => 1,
            ResultKind::Caution => 2,
            ResultKind::Warning => 3,
            ResultKind::Danger => 4,
        }
    }

    /// Display glyph printed in front of the message.
    pub fn glyph(self) -> &'static str {
        match self {
            ResultKind::Good => "✅",
            ResultKind::Danger => "❌",
            ResultKind::Warning => "❗️",
            ResultKind::Caution => "🔸",
            ResultKind::Info => "• ",
            ResultKind::Unknown => "❓",
        }
    }

    /// Returns `true` for every kind ranked above the `good`/`info` floor.
    pub fn is_issue(self) -> bool {
        self.rank() > 0
    }

    /// Returns the most severe kind in `kinds`, starting from a `good` floor.
    ///
    /// An empty sequence yields [`ResultKind::Good`]. On equal rank the
    /// earlier kind is kept, so a run of `good` and `info` stays `good`.
    ///
    /// ```
    /// use secure_repo::finding::ResultKind;
    ///
    /// let worst = ResultKind::worst([ResultKind::Info, ResultKind::Caution, ResultKind::Good]);
    /// assert_eq!(worst, ResultKind::Caution);
    /// assert_eq!(ResultKind::worst([ResultKind::Info]), ResultKind::Good);
    /// ```
    pub fn worst<I>(kinds: I) -> ResultKind
    where
        I: IntoIterator<Item = ResultKind>,
    {
        kinds.into_iter().fold(ResultKind::Good, |worst, kind| {
            if kind.rank() > worst.rank() {
                kind
            } else {
                worst
            }
        })
    }

    fn as_str(self) -> &'static str {
        match self {
            ResultKind::Good => "good",
            ResultKind::Danger => "danger",
            ResultKind::Warning => "warning",
            ResultKind::Caution => "caution",
            ResultKind::Info => "info",
            ResultKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional extras attached to a recorded finding.
///
/// `children` is only honored by the flat recording operations; a section's
/// children are the findings recorded while it is open.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Details {
    pub details: Option<String>,
    pub resolve_url: Option<String>,
    pub docs_url: Option<String>,
    pub children: Vec<Finding>,
}

impl Details {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn resolve_url(mut self, url: impl Into<String>) -> Self {
        self.resolve_url = Some(url.into());
        self
    }

    pub fn docs_url(mut self, url: impl Into<String>) -> Self {
        self.docs_url = Some(url.into());
        self
    }

    pub fn children(mut self, children: Vec<Finding>) -> Self {
        self.children = children;
        self
    }
}

/// One reported observation about a repository's configuration.
///
/// A finding with children is a *section* when it was produced by
/// [`ResultLogger::write_section`](crate::logger::ResultLogger::write_section);
/// its `kind` is then already the rolled-up worst kind.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Finding {
    pub kind: ResultKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolve_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Finding>,
}

impl Finding {
    pub fn new(kind: ResultKind, message: impl Into<String>) -> Self {
        Finding::with_details(kind, message, Details::default())
    }

    pub fn with_details(kind: ResultKind, message: impl Into<String>, details: Details) -> Self {
        Finding {
            kind,
            message: message.into(),
            details: details.details,
            resolve_url: details.resolve_url,
            docs_url: details.docs_url,
            children: details.children,
        }
    }
}

/// Findings recorded for a single repository.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RepoFindings {
    pub repo: String,
    pub findings: Vec<Finding>,
}

impl RepoFindings {
    /// Worst kind among this repository's top-level findings.
    pub fn worst_kind(&self) -> ResultKind {
        ResultKind::worst(self.findings.iter().map(|f| f.kind))
    }
}

/// Findings for every audited repository, in first-audited order.
///
/// Entries are only ever appended; an identifier that is audited twice keeps
/// a single entry and its earlier findings.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Report {
    pub repos: Vec<RepoFindings>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the findings list for `repo`, creating an empty one if absent.
    pub fn entry(&mut self, repo: &str) -> &mut Vec<Finding> {
        let idx = match self.repos.iter().position(|r| r.repo == repo) {
            Some(idx) => idx,
            None => {
                self.repos.push(RepoFindings {
                    repo: repo.to_string(),
                    findings: Vec::new(),
                });
                self.repos.len() - 1
            }
        };
        &mut self.repos[idx].findings
    }

    /// Top-level findings recorded for `repo`, if it has been audited.
    pub fn findings(&self, repo: &str) -> Option<&[Finding]> {
        self.repos
            .iter()
            .find(|r| r.repo == repo)
            .map(|r| r.findings.as_slice())
    }

    /// Worst top-level kind across every repository.
    pub fn worst_kind(&self) -> ResultKind {
        ResultKind::worst(self.repos.iter().map(RepoFindings::worst_kind))
    }

    /// Counts top-level findings per kind, in [`ResultKind::ALL`] order.
    pub fn count_by_kind(&self) -> [(ResultKind, usize); 6] {
        let mut counts = ResultKind::ALL.map(|k| (k, 0usize));
        for finding in self.repos.iter().flat_map(|r| &r.findings) {
            if let Some(slot) = counts.iter_mut().find(|(k, _)| *k == finding.kind) {
                slot.1 += 1;
            }
        }
        counts
    }
}
