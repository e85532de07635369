//! Span diagnostics for filter queries.
//!
//! Parsing is total, so diagnostics are the only channel through which a
//! malformed token explains itself. Each diagnostic carries a range into
//! the query text, a message, optional hints, an optional fix, and optional
//! related ranges; [`DiagnosticsPrinter`] renders them rustc-style.
//!
//! Diagnostics are created through the builder:
//!
//! ```ignore
//! diagnostics
//!     .report(DiagnosticKind::UnknownKey, range)
//!     .message(key)
//!     .emit();
//! ```

mod message;
mod printer;

#[cfg(test)]
mod tests;

use text_size::TextRange;

pub use message::{DiagnosticKind, DiagnosticMessage, Severity};
pub use printer::DiagnosticsPrinter;

use message::{Fix, RelatedInfo};

/// Every diagnostic produced while parsing one query, source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a diagnostic. Call [`DiagnosticBuilder::emit`] to record it.
    pub fn report(&mut self, kind: DiagnosticKind, range: TextRange) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: DiagnosticMessage::new(kind, range),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(DiagnosticMessage::is_error)
    }

    pub fn has_warnings(&self) -> bool {
        self.messages.iter().any(DiagnosticMessage::is_warning)
    }

    pub fn error_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_warning()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter()
    }

    /// Absorbs another collection, keeping its message order.
    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }

    /// Starts a printer over these diagnostics.
    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }

    /// Plain text render against the query source. Shorthand for the
    /// printer with default options.
    pub fn render(&self, source: &str) -> String {
        self.printer().source(source).render()
    }

    pub(crate) fn push(&mut self, message: DiagnosticMessage) {
        self.messages.push(message);
    }
}

/// Builder returned by [`Diagnostics::report`].
#[must_use = "diagnostic not recorded, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: DiagnosticMessage,
}

impl<'a> DiagnosticBuilder<'a> {
    /// Fills the kind's message template with the offending key or value.
    pub fn message(mut self, detail: impl AsRef<str>) -> Self {
        self.message.message = self.message.kind.message(Some(detail.as_ref()));
        self
    }

    /// Adds a hint below any the kind carries by default.
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.message.hints.push(hint.into());
        self
    }

    /// Points at another range that explains this diagnostic.
    pub fn related_to(mut self, message: impl Into<String>, range: TextRange) -> Self {
        self.message.related.push(RelatedInfo {
            message: message.into(),
            range,
        });
        self
    }

    /// Attaches a replacement for the annotated range.
    pub fn fix(mut self, description: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.message.fix = Some(Fix {
            replacement: replacement.into(),
            description: description.into(),
        });
        self
    }

    /// Records the diagnostic.
    pub fn emit(self) {
        self.diagnostics.push(self.message);
    }
}
