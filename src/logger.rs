//! The result logger: the single sink for findings and producer of the text
//! report.
//!
//! A [`ResultLogger`] tracks one repository at a time. Findings recorded
//! outside a section are written to the output immediately; findings recorded
//! while a section is open are buffered as the section's children and written
//! when [`write_section`](ResultLogger::write_section) closes it, with the
//! section's kind rolled up from the worst child.
//!
//! ```
//! use secure_repo::finding::Details;
//! use secure_repo::logger::ResultLogger;
//!
//! let mut logger = ResultLogger::new(Vec::<u8>::new());
//! logger.set_repo("octo/repo")?;
//! logger.start_section("Default branch is protected", Details::new())?;
//! logger.good("Force pushes are not allowed", Details::new())?;
//! logger.caution("Admins may bypass policies", Details::new())?;
//! logger.write_section()?;
//!
//! let out = String::from_utf8(logger.into_output()).unwrap();
//! assert!(out.contains("Default branch is protected (with possible issues)"));
//! # Ok::<(), secure_repo::logger::LoggerError>(())
//! ```

use std::io::{self, Write};

use crate::finding::{Details, Finding, Report, ResultKind};
use crate::output::pretty;

/// Misuse of the logger's session protocol, or a failed write.
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("repository not set")]
    NoRepo,

    #[error("section already started: {open:?}")]
    SectionAlreadyOpen { open: String },

    #[error("no section to write")]
    NoSectionOpen,

    #[error("failed to write report output: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Default)]
enum SectionState {
    #[default]
    Idle,
    Open(Finding),
}

/// Accumulates findings per repository and renders them as they complete.
///
/// `W` is the output sink: stdout for the binary, a `Vec<u8>` in tests, or
/// [`io::sink`] when only the structured [`Report`] is wanted. Checks take
/// `&mut ResultLogger<dyn Write>`, which any concrete logger coerces to.
pub struct ResultLogger<W: Write + ?Sized = io::Stdout> {
    report: Report,
    repo: Option<String>,
    indent: usize,
    section: SectionState,
    out: W,
}

impl ResultLogger<io::Stdout> {
    pub fn stdout() -> Self {
        ResultLogger::new(io::stdout())
    }
}

impl<W: Write> ResultLogger<W> {
    pub fn new(out: W) -> Self {
        ResultLogger {
            report: Report::new(),
            repo: None,
            indent: 0,
            section: SectionState::Idle,
            out,
        }
    }

    pub fn into_report(self) -> Report {
        self.report
    }

    /// Consumes the logger and returns its output sink.
    pub fn into_output(self) -> W {
        self.out
    }
}

impl<W: Write + ?Sized> ResultLogger<W> {
    /// Begins recording findings for `repo`.
    ///
    /// Creates the repository's report entry if it does not exist yet; an
    /// existing entry keeps its findings. Indentation is reset to 0.
    ///
    /// A section left open is discarded without being written or recorded,
    /// and returned so the caller can tell that it happened.
    pub fn set_repo(&mut self, repo: &str) -> Result<Option<Finding>, LoggerError> {
        self.report.entry(repo);
        self.repo = Some(repo.to_string());
        self.indent = 0;

        let discarded = match std::mem::take(&mut self.section) {
            SectionState::Open(section) => {
                tracing::warn!(
                    section = %section.message,
                    children = section.children.len(),
                    "discarding unclosed section"
                );
                Some(section)
            }
            SectionState::Idle => None,
        };

        writeln!(self.out)?;
        Ok(discarded)
    }

    /// Writes the separator line for the current repository.
    pub fn repo_header(&mut self) -> Result<(), LoggerError> {
        let repo = self.repo.as_deref().ok_or(LoggerError::NoRepo)?;
        self.out.write_all(pretty::format_repo_header(repo).as_bytes())?;
        Ok(())
    }

    /// Overrides the indentation depth used for subsequent output.
    pub fn set_indent(&mut self, level: usize) {
        self.indent = level;
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn current_repo(&self) -> Option<&str> {
        self.repo.as_deref()
    }

    pub fn is_section_open(&self) -> bool {
        matches!(self.section, SectionState::Open(_))
    }

    /// Opens a section. Findings recorded until [`write_section`](Self::write_section)
    /// become its children.
    ///
    /// Sections do not nest.
    pub fn start_section(
        &mut self,
        message: impl Into<String>,
        details: Details,
    ) -> Result<(), LoggerError> {
        if self.repo.is_none() {
            return Err(LoggerError::NoRepo);
        }
        if let SectionState::Open(ref open) = self.section {
            return Err(LoggerError::SectionAlreadyOpen {
                open: open.message.clone(),
            });
        }
        let section = Finding::with_details(
            ResultKind::Good,
            message,
            Details {
                children: Vec::new(),
                ..details
            },
        );
        self.section = SectionState::Open(section);
        Ok(())
    }

    /// Closes the open section, rolls up its kind, and records and writes it.
    pub fn write_section(&mut self) -> Result<(), LoggerError> {
        if self.repo.is_none() {
            return Err(LoggerError::NoRepo);
        }
        let mut section = match std::mem::take(&mut self.section) {
            SectionState::Open(section) => section,
            SectionState::Idle => return Err(LoggerError::NoSectionOpen),
        };

        section.kind = ResultKind::worst(
            std::iter::once(section.kind).chain(section.children.iter().map(|c| c.kind)),
        );
        if section.kind.is_issue() {
            let suffix = if section.kind == ResultKind::Danger {
                "issues"
            } else {
                "possible issues"
            };
            section.message = format!("{} (with {suffix})", section.message);
        }

        self.emit(section)
    }

    /// Records a finding of `kind`: buffered into the open section if there
    /// is one, otherwise recorded and written immediately.
    pub fn record(
        &mut self,
        kind: ResultKind,
        message: impl Into<String>,
        details: Details,
    ) -> Result<(), LoggerError> {
        if self.repo.is_none() {
            return Err(LoggerError::NoRepo);
        }
        let finding = Finding::with_details(kind, message, details);
        if let SectionState::Open(ref mut section) = self.section {
            section.children.push(finding);
            return Ok(());
        }
        self.emit(finding)
    }

    /// Setting is secure.
    pub fn good(
        &mut self,
        message: impl Into<String>,
        details: Details,
    ) -> Result<(), LoggerError> {
        self.record(ResultKind::Good, message, details)
    }

    /// Issue should be corrected immediately.
    pub fn danger(
        &mut self,
        message: impl Into<String>,
        details: Details,
    ) -> Result<(), LoggerError> {
        self.record(ResultKind::Danger, message, details)
    }

    /// Evaluate possible issue and strongly consider correcting if needed.
    pub fn warning(
        &mut self,
        message: impl Into<String>,
        details: Details,
    ) -> Result<(), LoggerError> {
        self.record(ResultKind::Warning, message, details)
    }

    /// Changing this setting may enhance security.
    pub fn caution(
        &mut self,
        message: impl Into<String>,
        details: Details,
    ) -> Result<(), LoggerError> {
        self.record(ResultKind::Caution, message, details)
    }

    /// Informational point which is less relevant to security.
    pub fn info(
        &mut self,
        message: impl Into<String>,
        details: Details,
    ) -> Result<(), LoggerError> {
        self.record(ResultKind::Info, message, details)
    }

    /// Unexpected result, or failed to check.
    pub fn unknown(
        &mut self,
        message: impl Into<String>,
        details: Details,
    ) -> Result<(), LoggerError> {
        self.record(ResultKind::Unknown, message, details)
    }

    /// Writes free-form text that is not a finding (e.g. a trailing newline
    /// between repositories).
    pub fn write_raw(&mut self, text: &str) -> Result<(), LoggerError> {
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn flush(&mut self) -> Result<(), LoggerError> {
        self.out.flush()?;
        Ok(())
    }

    fn emit(&mut self, finding: Finding) -> Result<(), LoggerError> {
        let repo = self.repo.as_deref().ok_or(LoggerError::NoRepo)?;
        let text = pretty::render_finding(&finding, self.indent, true);
        self.report.entry(repo).push(finding);
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logger() -> ResultLogger<Vec<u8>> {
        ResultLogger::new(Vec::new())
    }

    fn output(logger: ResultLogger<Vec<u8>>) -> String {
        String::from_utf8(logger.into_output()).unwrap()
    }

    #[test]
    fn recording_before_set_repo_is_rejected() {
        let mut logger = logger();
        assert!(matches!(
            logger.good("x", Details::new()),
            Err(LoggerError::NoRepo)
        ));
        assert!(matches!(logger.write_section(), Err(LoggerError::NoRepo)));
        assert!(matches!(logger.repo_header(), Err(LoggerError::NoRepo)));
        assert!(output(logger).is_empty());
    }

    #[test]
    fn section_state_machine() {
        let mut logger = logger();
        logger.set_repo("o/r").unwrap();
        assert!(!logger.is_section_open());
        assert!(matches!(
            logger.write_section(),
            Err(LoggerError::NoSectionOpen)
        ));
        logger.start_section("T", Details::new()).unwrap();
        assert!(logger.is_section_open());
        let err = logger.start_section("U", Details::new()).unwrap_err();
        assert!(matches!(err, LoggerError::SectionAlreadyOpen { ref open } if open == "T"));
        assert!(logger.is_section_open());
        assert!(logger.report().findings("o/r").unwrap().is_empty());
    }

    #[test]
    fn set_repo_resets_indent() {
        let mut logger = logger();
        logger.set_repo("o/r").unwrap();
        logger.set_indent(3);
        logger.set_repo("o/s").unwrap();
        assert_eq!(logger.indent(), 0);
        assert_eq!(logger.current_repo(), Some("o/s"));
    }

    #[test]
    fn section_details_survive_roll_up() {
        let mut logger = logger();
        logger.set_repo("o/r").unwrap();
        logger
            .start_section(
                "S",
                Details::new().resolve_url("https://example.com/settings"),
            )
            .unwrap();
        logger.danger("bad", Details::new()).unwrap();
        logger.write_section().unwrap();

        let findings = logger.report().findings("o/r").unwrap();
        assert_eq!(findings[0].message, "S (with issues)");
        assert_eq!(findings[0].kind, ResultKind::Danger);
        assert!(output(logger).contains("(Resolve issues at https://example.com/settings)"));
    }
}
