use secure_repo::finding::{Details, Finding, ResultKind};
use secure_repo::logger::{LoggerError, ResultLogger};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn logger_for(repo: &str) -> ResultLogger<Vec<u8>> {
    let mut logger = ResultLogger::new(Vec::<u8>::new());
    logger.set_repo(repo).unwrap();
    logger
}

fn output(logger: ResultLogger<Vec<u8>>) -> String {
    String::from_utf8(logger.into_output()).unwrap()
}

fn record(logger: &mut ResultLogger<Vec<u8>>, kind: ResultKind, message: &str) {
    logger.record(kind, message, Details::new()).unwrap();
}

// --- Flat findings ---

#[test]
fn flat_findings_are_emitted_immediately_in_order() {
    let mut logger = logger_for("o/r");
    logger.danger("A", Details::new()).unwrap();
    logger.good("B", Details::new()).unwrap();

    let findings = logger.report().findings("o/r").unwrap().to_vec();
    assert_eq!(
        findings,
        vec![
            Finding::new(ResultKind::Danger, "A"),
            Finding::new(ResultKind::Good, "B"),
        ]
    );
    assert_eq!(output(logger), "\n❌ A\n\n✅ B\n\n");
}

#[test]
fn every_recording_operation_uses_its_kind() {
    let mut logger = logger_for("o/r");
    logger.good("g", Details::new()).unwrap();
    logger.danger("d", Details::new()).unwrap();
    logger.warning("w", Details::new()).unwrap();
    logger.caution("c", Details::new()).unwrap();
    logger.info("i", Details::new()).unwrap();
    logger.unknown("u", Details::new()).unwrap();

    let kinds: Vec<ResultKind> = logger
        .report()
        .findings("o/r")
        .unwrap()
        .iter()
        .map(|f| f.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            ResultKind::Good,
            ResultKind::Danger,
            ResultKind::Warning,
            ResultKind::Caution,
            ResultKind::Info,
            ResultKind::Unknown,
        ]
    );
    assert_eq!(
        output(logger),
        "\n✅ g\n\n❌ d\n\n❗️ w\n\n🔸 c\n\n•  i\n\n❓ u\n\n"
    );
}

#[test]
fn flat_finding_renders_details_links_and_children() {
    let mut logger = logger_for("o/r");
    logger
        .warning(
            "Found actions secrets",
            Details::new()
                .details("Verify these.")
                .resolve_url("https://github.com/o/r/settings/secrets")
                .docs_url("https://docs.github.com/actions")
                .children(vec![
                    Finding::new(ResultKind::Info, "ONE"),
                    Finding::new(ResultKind::Info, "TWO"),
                ]),
        )
        .unwrap();

    assert_eq!(
        output(logger),
        "\n❗️ Found actions secrets\n\
         Verify these.\n\
         (Resolve issues at https://github.com/o/r/settings/secrets)\n\
         (Docs: https://docs.github.com/actions)\n   \
         •  ONE\n   \
         •  TWO\n\n"
    );
}

#[test]
fn resolve_url_is_never_rendered_for_passing_findings() {
    let mut logger = logger_for("o/r");
    let url = "https://github.com/o/r/settings/actions";
    logger
        .good("fine", Details::new().resolve_url(url))
        .unwrap();
    logger
        .info("noted", Details::new().resolve_url(url))
        .unwrap();

    // Still stored, only not rendered.
    assert_eq!(
        logger.report().findings("o/r").unwrap()[0].resolve_url.as_deref(),
        Some(url)
    );
    assert!(!output(logger).contains("Resolve issues"));
}

// --- Sections ---

#[test]
fn section_rolls_up_possible_issues() {
    let mut logger = logger_for("o/r");
    logger.start_section("S", Details::new()).unwrap();
    logger.caution("c1", Details::new()).unwrap();
    logger.good("c2", Details::new()).unwrap();

    // Nothing is written while the section is open.
    assert!(logger.report().findings("o/r").unwrap().is_empty());

    logger.write_section().unwrap();

    let findings = logger.report().findings("o/r").unwrap().to_vec();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].kind, ResultKind::Caution);
    assert_eq!(findings[0].message, "S (with possible issues)");
    assert_eq!(
        findings[0].children,
        vec![
            Finding::new(ResultKind::Caution, "c1"),
            Finding::new(ResultKind::Good, "c2"),
        ]
    );
    assert_eq!(
        output(logger),
        "\n🔸 S (with possible issues)\n   🔸 c1\n   ✅ c2\n\n"
    );
}

#[test]
fn section_suffix_follows_worst_child() {
    for kind in ResultKind::ALL {
        let mut logger = logger_for("o/r");
        logger.start_section("S", Details::new()).unwrap();
        record(&mut logger, ResultKind::Good, "ok");
        record(&mut logger, kind, "child");
        record(&mut logger, ResultKind::Info, "note");
        logger.write_section().unwrap();

        let section = &logger.report().findings("o/r").unwrap()[0];
        let expected = match kind {
            ResultKind::Danger => "S (with issues)",
            ResultKind::Warning | ResultKind::Caution | ResultKind::Unknown => {
                "S (with possible issues)"
            }
            ResultKind::Good | ResultKind::Info => "S",
        };
        assert_eq!(section.message, expected, "child kind {kind}");
        assert_eq!(section.kind.rank(), kind.rank(), "child kind {kind}");
    }
}

#[test]
fn section_with_only_passing_children_stays_good() {
    let mut logger = logger_for("o/r");
    logger.start_section("Default branch is protected", Details::new()).unwrap();
    logger.info("ci/build", Details::new()).unwrap();
    logger.good("Force pushes are not allowed", Details::new()).unwrap();
    logger.write_section().unwrap();

    let section = &logger.report().findings("o/r").unwrap()[0];
    assert_eq!(section.kind, ResultKind::Good);
    assert_eq!(section.message, "Default branch is protected");
}

#[test]
fn danger_outranks_other_issues_in_a_section() {
    let mut logger = logger_for("o/r");
    logger.start_section("S", Details::new()).unwrap();
    record(&mut logger, ResultKind::Warning, "w");
    record(&mut logger, ResultKind::Danger, "d");
    record(&mut logger, ResultKind::Caution, "c");
    logger.write_section().unwrap();

    let section = &logger.report().findings("o/r").unwrap()[0];
    assert_eq!(section.kind, ResultKind::Danger);
    assert_eq!(section.message, "S (with issues)");
}

#[test]
fn nested_children_of_a_section_child_render_two_levels_deep() {
    let mut logger = logger_for("o/r");
    logger.start_section("P", Details::new()).unwrap();
    logger
        .good(
            "Status checks are required",
            Details::new().children(vec![Finding::new(ResultKind::Info, "ci/test")]),
        )
        .unwrap();
    logger.write_section().unwrap();

    assert_eq!(
        output(logger),
        "\n✅ P\n   ✅ Status checks are required\n      •  ci/test\n\n"
    );
}

#[test]
fn opening_a_second_section_is_a_usage_error() {
    let mut logger = logger_for("o/r");
    logger.start_section("T", Details::new()).unwrap();
    let err = logger.start_section("U", Details::new()).unwrap_err();
    assert!(matches!(err, LoggerError::SectionAlreadyOpen { .. }));
    assert!(err.to_string().contains("section already started"));

    assert!(logger.report().findings("o/r").unwrap().is_empty());
    assert_eq!(output(logger), "\n");
}

#[test]
fn closing_without_a_section_is_a_usage_error() {
    let mut logger = logger_for("o/r");
    assert!(matches!(
        logger.write_section(),
        Err(LoggerError::NoSectionOpen)
    ));
}

#[test]
fn calls_before_set_repo_are_usage_errors() {
    let mut logger = ResultLogger::new(Vec::<u8>::new());
    assert!(matches!(
        logger.danger("x", Details::new()),
        Err(LoggerError::NoRepo)
    ));
    assert!(matches!(
        logger.start_section("x", Details::new()),
        Err(LoggerError::NoRepo)
    ));
    assert!(matches!(logger.write_section(), Err(LoggerError::NoRepo)));
    assert!(matches!(logger.repo_header(), Err(LoggerError::NoRepo)));
    assert!(logger.report().repos.is_empty());
}

// --- Indentation ---

#[test]
fn children_indent_relative_to_current_depth_and_depth_is_restored() {
    let mut logger = logger_for("o/r");
    logger.set_indent(2);
    logger.start_section("S", Details::new()).unwrap();
    logger.good("child", Details::new()).unwrap();
    logger.write_section().unwrap();
    logger.good("after", Details::new()).unwrap();
    assert_eq!(logger.indent(), 2);

    let out = output(logger);
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines.contains(&"      ✅ S"));
    assert!(lines.contains(&"         ✅ child"));
    assert!(lines.contains(&"      ✅ after"));
}

// --- Repository context ---

#[test]
fn repo_header_names_the_repository() {
    let mut logger = logger_for("octo/repo");
    logger.repo_header().unwrap();
    let out = output(logger);
    assert!(out.contains("======== octo/repo ========"));
    assert!(out.ends_with("\n\n"));
}

#[test]
fn set_repo_discards_an_open_section() {
    let mut logger = logger_for("o/r");
    logger.danger("flat", Details::new()).unwrap();
    logger.start_section("S", Details::new()).unwrap();
    logger.good("buffered", Details::new()).unwrap();
    logger.set_indent(1);

    let discarded = logger.set_repo("o/r").unwrap().expect("section was open");
    assert_eq!(discarded.message, "S");
    assert_eq!(discarded.children.len(), 1);

    assert!(!logger.is_section_open());
    assert_eq!(logger.indent(), 0);
    assert_eq!(
        logger.report().findings("o/r").unwrap(),
        &[Finding::new(ResultKind::Danger, "flat")]
    );
    assert_eq!(logger.report().repos.len(), 1);
    assert!(!output(logger).contains("buffered"));
}

#[test]
fn set_repo_without_open_section_returns_none() {
    let mut logger = ResultLogger::new(Vec::<u8>::new());
    assert!(logger.set_repo("o/a").unwrap().is_none());
    logger.good("a", Details::new()).unwrap();
    assert!(logger.set_repo("o/b").unwrap().is_none());
    logger.danger("b", Details::new()).unwrap();

    let report = logger.into_report();
    let repos: Vec<&str> = report.repos.iter().map(|r| r.repo.as_str()).collect();
    assert_eq!(repos, vec!["o/a", "o/b"]);
    assert_eq!(report.worst_kind(), ResultKind::Danger);
}
