use text_size::TextRange;

use super::{DiagnosticKind, Diagnostics, Severity};

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

#[test]
fn counts_and_flags() {
    let mut diagnostics = Diagnostics::new();
    assert!(diagnostics.is_empty());
    assert!(!diagnostics.has_errors());

    diagnostics
        .report(DiagnosticKind::UnknownKey, range(0, 4))
        .message("spam")
        .emit();
    diagnostics
        .report(DiagnosticKind::EmptyValue, range(5, 12))
        .message("crate")
        .emit();

    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.warning_count(), 1);
    assert!(diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
}

#[test]
fn severity_orders_warning_below_error() {
    assert!(Severity::Warning < Severity::Error);
}

#[test]
fn extend_merges_in_order() {
    let mut first = Diagnostics::new();
    first.report(DiagnosticKind::NotKeyValue, range(0, 4)).emit();

    let mut second = Diagnostics::new();
    second
        .report(DiagnosticKind::EmptyValue, range(5, 12))
        .message("crate")
        .emit();

    first.extend(second);
    assert_eq!(first.len(), 2);
    let kinds: Vec<_> = first.iter().map(|m| m.kind).collect();
    assert_eq!(kinds, [DiagnosticKind::NotKeyValue, DiagnosticKind::EmptyValue]);
}

#[test]
fn templates_fill_in_details() {
    assert_eq!(
        DiagnosticKind::UnknownKey.message(Some("colour")),
        "`colour` is not a filter key",
    );
    assert_eq!(DiagnosticKind::UnknownKey.message(None), "unknown filter key");
    assert_eq!(DiagnosticKind::NotKeyValue.message(Some("+")), "not a `key:value` token");
    assert_eq!(
        DiagnosticKind::ConflictingSigns.message(Some("tokio")),
        "`tokio` is both included and excluded",
    );
}

#[test]
fn plain_render_without_source() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::EmptyValue, range(0, 7))
        .message("crate")
        .emit();
    insta::assert_snapshot!(
        diagnostics.printer().render(),
        @"warning: `crate` has no value yet",
    );
}

#[test]
fn plain_render_appends_hints() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::InvalidToggle, range(0, 12))
        .message("maybe")
        .emit();
    insta::assert_snapshot!(
        diagnostics.printer().render(),
        @"error: `maybe` is not a toggle value (hint: use `on` or `off`)",
    );
}

#[test]
fn annotated_render() {
    let source = "+crate:tokio colour:red";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownKey, range(13, 23))
        .message("colour")
        .emit();
    insta::assert_snapshot!(diagnostics.render(source), @r"
    error: `colour` is not a filter key
      |
    1 | +crate:tokio colour:red
      |              ^^^^^^^^^^ known keys: node, location, crate, process, kind, module, loners, source, colorBy, groupBy, labelBy, focus
    ");
}

#[test]
fn annotated_render_with_path() {
    let source = "+crate:";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::EmptyValue, range(0, 7))
        .message("crate")
        .emit();
    insta::assert_snapshot!(
        diagnostics.printer().source(source).path("query.flt").render(),
        @r"
    warning: `crate` has no value yet
     --> query.flt:1:1
      |
    1 | +crate:
      | ^^^^^^^
    ",
    );
}

#[test]
fn zero_width_range_still_gets_a_caret() {
    let source = "hello world!";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::InvalidChoice, range(5, 5))
        .emit();
    insta::assert_snapshot!(diagnostics.render(source), @r"
    error: value not accepted for this key
      |
    1 | hello world!
      |      ^
    ");
}

#[test]
fn fix_renders_as_patch() {
    let source = "crate:tokio";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::MissingSign, range(0, 11))
        .message("crate")
        .fix("prefix with `+` to include", "+crate:tokio")
        .emit();
    insta::assert_snapshot!(diagnostics.render(source), @r"
    error: `crate` needs a `+` or `-` sign
      |
    1 | crate:tokio
      | ^^^^^^^^^^^ prefix with `+` to include or `-` to exclude
      |
    help: prefix with `+` to include
      |
    1 - crate:tokio
    1 + +crate:tokio
      |
    ");
}

#[test]
fn related_range_is_annotated() {
    let source = "+crate:tokio -crate:tokio";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ConflictingSigns, range(13, 25))
        .message("tokio")
        .related_to("included here", range(0, 12))
        .emit();

    let rendered = diagnostics.render(source);
    assert!(rendered.contains("warning: `tokio` is both included and excluded"));
    assert!(rendered.contains("^^^^^^^^^^^^"));
    assert!(rendered.contains("------------"));
    assert!(rendered.contains("included here"));
}

#[test]
fn blocks_are_separated_by_blank_lines() {
    let source = "spam +crate:";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::NotKeyValue, range(0, 4))
        .emit();
    diagnostics
        .report(DiagnosticKind::EmptyValue, range(5, 12))
        .message("crate")
        .emit();

    let rendered = diagnostics.render(source);
    assert!(rendered.contains("error: not a `key:value` token"));
    assert!(rendered.contains("warning: `crate` has no value yet"));
    assert!(rendered.contains("\n\n"));
    assert!(!rendered.ends_with('\n'));
}

#[test]
fn colored_render_emits_ansi() {
    let source = "spam";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::NotKeyValue, range(0, 4))
        .emit();

    let plain = diagnostics.printer().source(source).render();
    let colored = diagnostics.printer().source(source).colored(true).render();
    assert!(!plain.contains('\x1b'));
    assert!(colored.contains('\x1b'));
}

#[test]
fn ranges_past_the_source_are_clamped() {
    let source = "ab";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownKey, range(0, 40))
        .message("ab")
        .emit();
    // Must not panic; the annotation covers what exists.
    let rendered = diagnostics.render(source);
    assert!(rendered.contains("^^"));
}
