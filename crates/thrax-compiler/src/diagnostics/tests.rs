use rowan::TextRange;

use super::*;

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedExpression, range(0, 5))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    insta::assert_snapshot!(diagnostics.printer().render(), @"error at 0..5: expected an expression");
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UndefinedReference, range(4, 7))
        .message("foo")
        .emit();

    assert!(!diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
    assert_eq!(diagnostics.warning_count(), 1);
    insta::assert_snapshot!(diagnostics.printer().render(), @"warning at 4..7: `foo` is not defined");
}

#[test]
fn expected_templates_append_detail() {
    assert_eq!(
        DiagnosticKind::ExpectedSemicolon.message(Some("after definition")),
        "expected `;` after definition"
    );
    assert_eq!(
        DiagnosticKind::UnclosedParen.message(Some("expected `)`")),
        "missing closing `)`; expected `)`"
    );
    assert_eq!(
        DiagnosticKind::UnexpectedToken.message(Some("not a valid expression")),
        "unexpected token: not a valid expression"
    );
}

#[test]
fn builder_with_related_and_fix() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedParen, range(0, 5))
        .message("expected `)`")
        .related_to("group started here", range(0, 1))
        .emit();
    diagnostics
        .report(DiagnosticKind::ExpectedSemicolon, range(9, 9))
        .fix("add `;`", ";")
        .emit();

    insta::assert_snapshot!(diagnostics.printer().render(), @r"
    error at 0..5: missing closing `)`; expected `)` (related: group started here at 0..1)
    error at 9..9: expected `;` (fix: add `;`)
    ");
}

#[test]
fn counts_by_severity() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnexpectedToken, range(0, 1))
        .emit();
    diagnostics
        .report(DiagnosticKind::WeightNotSupported, range(2, 3))
        .emit();
    diagnostics
        .report(DiagnosticKind::ImportNotSupported, range(4, 5))
        .emit();

    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.warning_count(), 2);
}

#[test]
fn filtered_hides_cascade_inside_unclosed() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedParen, range(0, 20))
        .emit();
    diagnostics
        .report(DiagnosticKind::UnexpectedToken, range(5, 6))
        .emit();
    diagnostics
        .report(DiagnosticKind::ExpectedSemicolon, range(30, 30))
        .emit();

    let filtered = diagnostics.filtered();
    let kinds: Vec<_> = filtered.iter().map(|d| d.kind()).collect();
    assert_eq!(
        kinds,
        vec![DiagnosticKind::UnclosedParen, DiagnosticKind::ExpectedSemicolon]
    );
}

#[test]
fn filtered_prefers_root_cause_at_same_start() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedBrace, range(3, 10))
        .emit();
    diagnostics
        .report(DiagnosticKind::ExpectedNumber, range(3, 4))
        .emit();

    let filtered = diagnostics.filtered();
    assert_eq!(filtered.len(), 1);
    assert_eq!(
        filtered.iter().next().map(|d| d.kind()),
        Some(DiagnosticKind::ExpectedNumber)
    );
}

#[test]
fn extend_appends() {
    let mut a = Diagnostics::new();
    a.report(DiagnosticKind::UnexpectedToken, range(0, 1)).emit();
    let mut b = Diagnostics::new();
    b.report(DiagnosticKind::FunctionNotSupported, range(1, 2))
        .emit();
    a.extend(b);
    assert_eq!(a.len(), 2);
    assert!(a.has_warnings());
}

#[test]
fn render_with_source_mentions_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UndefinedReference, range(4, 7))
        .message("abc")
        .emit();

    let out = diagnostics.render("x = abc;");
    assert!(out.contains("warning"));
    assert!(out.contains("`abc` is not defined"));
    assert!(out.contains("x = abc;"));
}

#[test]
fn summary_counts_by_severity() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedExpression, range(0, 5))
        .emit();
    diagnostics
        .report(DiagnosticKind::UndefinedReference, range(4, 7))
        .message("foo")
        .emit();

    insta::assert_snapshot!(diagnostics.printer().summary(true).render(), @r"
    error at 0..5: expected an expression
    warning at 4..7: `foo` is not defined
    1 error, 1 warning
    ");
}

#[test]
fn summary_is_omitted_without_diagnostics() {
    let diagnostics = Diagnostics::new();
    assert_eq!(diagnostics.printer().summary(true).render(), "");
}

#[test]
fn snippet_shows_fix_preview() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedSemicolon, range(7, 7))
        .message("after definition")
        .fix("add `;`", ";")
        .emit();

    let out = diagnostics.printer().source("x = 'a'").path("main.grm").render();
    assert!(out.contains("main.grm"));
    assert!(out.contains("expected `;` after definition"));
    assert!(out.contains("add `;`"));
    assert!(out.contains("x = 'a';"));
}
