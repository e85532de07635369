//! Rustc-style rendering of diagnostics via `annotate-snippets`.

use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Patch, Renderer, Snippet};
use text_size::TextRange;

use super::Diagnostics;
use super::message::{DiagnosticMessage, Severity};

/// Render options plus the diagnostics to render.
///
/// Without a source only the bare messages are printed; with one, each
/// diagnostic becomes an annotated snippet. The first hint of a diagnostic
/// renders as the label under its carets, a fix renders as a `help:` block
/// with the patched line.
pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            source: None,
            path: None,
            colored: false,
        }
    }

    /// Query text the ranges point into.
    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    /// Display path for the `-->` line.
    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    /// ANSI styling. Off by default.
    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Renders all diagnostics, blocks separated by blank lines. No
    /// trailing newline.
    pub fn render(self) -> String {
        let Some(source) = self.source else {
            return self.render_plain();
        };
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };
        let blocks: Vec<String> = self
            .diagnostics
            .iter()
            .map(|diagnostic| self.render_one(&renderer, source, diagnostic))
            .collect();
        blocks.join("\n\n")
    }

    fn render_plain(&self) -> String {
        let lines: Vec<String> = self
            .diagnostics
            .iter()
            .map(DiagnosticMessage::to_string)
            .collect();
        lines.join("\n")
    }

    fn render_one(
        &self,
        renderer: &Renderer,
        source: &str,
        diagnostic: &DiagnosticMessage,
    ) -> String {
        let range = adjust_range(diagnostic.range, source);

        let mut primary = AnnotationKind::Primary.span(range.clone());
        if let Some(hint) = diagnostic.hints.first() {
            primary = primary.label(hint);
        }
        let mut snippet = Snippet::source(source).line_start(1).annotation(primary);
        if let Some(path) = self.path {
            snippet = snippet.path(path);
        }
        for related in &diagnostic.related {
            snippet = snippet.annotation(
                AnnotationKind::Context
                    .span(adjust_range(related.range, source))
                    .label(&related.message),
            );
        }

        let level = severity_to_level(diagnostic.severity);
        let mut groups: Vec<Group> = vec![level.primary_title(&diagnostic.message).element(snippet)];

        if let Some(fix) = &diagnostic.fix {
            groups.push(
                Level::HELP.secondary_title(&fix.description).element(
                    Snippet::source(source)
                        .line_start(1)
                        .patch(Patch::new(range, &fix.replacement)),
                ),
            );
        }

        renderer.render(&groups)
    }
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

/// Clamps a range to the source and widens zero-width ranges so the caret
/// under an insertion point stays visible.
fn adjust_range(range: TextRange, source: &str) -> Range<usize> {
    let start = usize::from(range.start()).min(source.len());
    let end = usize::from(range.end()).clamp(start, source.len());
    if start == end && end < source.len() {
        start..end + 1
    } else {
        start..end
    }
}
