//! Diagnostic kinds and the message type they produce.

use std::fmt;

use text_size::TextRange;

/// Everything the parser can complain about, roughly in classification
/// order: token shape first, then key problems, then value problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    /// Token has no colon, or starts with one. Covers a lone `+`/`-`.
    NotKeyValue,
    /// Key is neither an axis nor a control key.
    UnknownKey,
    /// Axis key without a leading `+`/`-`.
    MissingSign,
    /// `<...>` suggestion template used as a value.
    PlaceholderValue,
    /// `loners:`/`source:` value outside the toggle vocabulary.
    InvalidToggle,
    /// `colorBy:`/`groupBy:`/`labelBy:` value outside the fixed set.
    InvalidChoice,
    /// `key:` with nothing after the colon.
    EmptyValue,
    /// Same value in both the include and exclude set of one axis.
    ConflictingSigns,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            DiagnosticKind::EmptyValue | DiagnosticKind::ConflictingSigns => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Message used when no detail is supplied.
    fn fallback_message(&self) -> &'static str {
        match self {
            DiagnosticKind::NotKeyValue => "not a `key:value` token",
            DiagnosticKind::UnknownKey => "unknown filter key",
            DiagnosticKind::MissingSign => "axis filter without a sign",
            DiagnosticKind::PlaceholderValue => "placeholder value",
            DiagnosticKind::InvalidToggle => "invalid toggle value",
            DiagnosticKind::InvalidChoice => "value not accepted for this key",
            DiagnosticKind::EmptyValue => "missing value",
            DiagnosticKind::ConflictingSigns => "value in both include and exclude sets",
        }
    }

    /// Template applied to the detail passed to `message`. `{}` is the
    /// offending key or value.
    fn custom_message(&self) -> Option<&'static str> {
        match self {
            DiagnosticKind::NotKeyValue => None,
            DiagnosticKind::UnknownKey => Some("`{}` is not a filter key"),
            DiagnosticKind::MissingSign => Some("`{}` needs a `+` or `-` sign"),
            DiagnosticKind::PlaceholderValue => {
                Some("`{}` is a suggestion placeholder, not a value")
            }
            DiagnosticKind::InvalidToggle => Some("`{}` is not a toggle value"),
            DiagnosticKind::InvalidChoice => Some("`{}` is not accepted here"),
            DiagnosticKind::EmptyValue => Some("`{}` has no value yet"),
            DiagnosticKind::ConflictingSigns => Some("`{}` is both included and excluded"),
        }
    }

    pub(crate) fn message(&self, detail: Option<&str>) -> String {
        match (self.custom_message(), detail) {
            (Some(template), Some(detail)) => template.replace("{}", detail),
            _ => self.fallback_message().to_string(),
        }
    }

    fn default_hint(&self) -> Option<&'static str> {
        match self {
            DiagnosticKind::NotKeyValue => Some("write `key:value`, e.g. `+crate:tokio`"),
            DiagnosticKind::UnknownKey => Some(
                "known keys: node, location, crate, process, kind, module, \
                 loners, source, colorBy, groupBy, labelBy, focus",
            ),
            DiagnosticKind::MissingSign => Some("prefix with `+` to include or `-` to exclude"),
            DiagnosticKind::PlaceholderValue => Some("replace it with a real value"),
            DiagnosticKind::InvalidToggle => Some("use `on` or `off`"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A suggested replacement for the annotated range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Fix {
    pub(crate) replacement: String,
    pub(crate) description: String,
}

/// A secondary range that explains the primary one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RelatedInfo {
    pub(crate) message: String,
    pub(crate) range: TextRange,
}

/// One rendered-or-renderable diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub range: TextRange,
    pub message: String,
    pub(crate) fix: Option<Fix>,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            range,
            message: kind.message(None),
            fix: None,
            related: Vec::new(),
            hints: kind.default_hint().map(String::from).into_iter().collect(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        for hint in &self.hints {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}
