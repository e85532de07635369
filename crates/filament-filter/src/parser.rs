//! Parser for filter query text.
//!
//! # Architecture
//!
//! - Total: parsing never fails, whatever the input.
//! - Lossless: every lexed token lands in [`FilterQuery::tokens`] exactly
//!   once, valid or not, so the chip input can always render what was typed.
//! - Invalid tokens apply nothing; they are kept for display and explained
//!   through [`Diagnostics`].
//!
//! # Classification
//!
//! A token needs a colon past position zero to be a `key:value` candidate.
//! The sign is split off, the key is matched case-insensitively, the value
//! is unquoted and trimmed. Signed tokens try the axes first, unsigned
//! tokens try the control keys first; `source` means the location axis when
//! signed and the location-toggle when unsigned.

use indexmap::IndexSet;
use serde::Serialize;
use text_size::TextRange;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::key::{Axis, ColorBy, ControlKey, GroupBy, LabelBy, Sign};
use crate::lexer::{lex, token_text};
use crate::quote::strip_quotes;

/// One classified token. Invalid tokens keep their raw text for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedToken {
    pub raw: String,
    pub sign: Option<Sign>,
    /// Key as typed, `None` when the token is not `key:value` shaped.
    pub key: Option<String>,
    /// Value after unquoting and trimming.
    pub value: Option<String>,
    pub valid: bool,
    #[serde(skip)]
    pub span: TextRange,
}

/// Parsed filter: predicate buckets, display controls, and the lossless
/// token list.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    pub tokens: Vec<ParsedToken>,

    pub include_node_ids: IndexSet<String>,
    pub exclude_node_ids: IndexSet<String>,
    pub include_locations: IndexSet<String>,
    pub exclude_locations: IndexSet<String>,
    pub include_crates: IndexSet<String>,
    pub exclude_crates: IndexSet<String>,
    pub include_processes: IndexSet<String>,
    pub exclude_processes: IndexSet<String>,
    pub include_kinds: IndexSet<String>,
    pub exclude_kinds: IndexSet<String>,
    pub include_modules: IndexSet<String>,
    pub exclude_modules: IndexSet<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub focused_node: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_loners: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_source: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_by: Option<ColorBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by: Option<GroupBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_by: Option<LabelBy>,

    #[serde(skip)]
    diagnostics: Diagnostics,
}

impl FilterQuery {
    /// True when every token applied cleanly.
    pub fn is_valid(&self) -> bool {
        self.tokens.iter().all(|token| token.valid)
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// One predicate bucket.
    pub fn bucket(&self, axis: Axis, sign: Sign) -> &IndexSet<String> {
        match (axis, sign) {
            (Axis::NodeId, Sign::Include) => &self.include_node_ids,
            (Axis::NodeId, Sign::Exclude) => &self.exclude_node_ids,
            (Axis::Location, Sign::Include) => &self.include_locations,
            (Axis::Location, Sign::Exclude) => &self.exclude_locations,
            (Axis::Crate, Sign::Include) => &self.include_crates,
            (Axis::Crate, Sign::Exclude) => &self.exclude_crates,
            (Axis::Process, Sign::Include) => &self.include_processes,
            (Axis::Process, Sign::Exclude) => &self.exclude_processes,
            (Axis::Kind, Sign::Include) => &self.include_kinds,
            (Axis::Kind, Sign::Exclude) => &self.exclude_kinds,
            (Axis::Module, Sign::Include) => &self.include_modules,
            (Axis::Module, Sign::Exclude) => &self.exclude_modules,
        }
    }

    fn bucket_mut(&mut self, axis: Axis, sign: Sign) -> &mut IndexSet<String> {
        match (axis, sign) {
            (Axis::NodeId, Sign::Include) => &mut self.include_node_ids,
            (Axis::NodeId, Sign::Exclude) => &mut self.exclude_node_ids,
            (Axis::Location, Sign::Include) => &mut self.include_locations,
            (Axis::Location, Sign::Exclude) => &mut self.exclude_locations,
            (Axis::Crate, Sign::Include) => &mut self.include_crates,
            (Axis::Crate, Sign::Exclude) => &mut self.exclude_crates,
            (Axis::Process, Sign::Include) => &mut self.include_processes,
            (Axis::Process, Sign::Exclude) => &mut self.exclude_processes,
            (Axis::Kind, Sign::Include) => &mut self.include_kinds,
            (Axis::Kind, Sign::Exclude) => &mut self.exclude_kinds,
            (Axis::Module, Sign::Include) => &mut self.include_modules,
            (Axis::Module, Sign::Exclude) => &mut self.exclude_modules,
        }
    }
}

/// Parses filter text into predicate buckets and display controls.
///
/// # Examples
///
/// ```
/// use filament_filter::parse;
///
/// let query = parse(r#"+crate:tokio -kind:"timer tick" loners:on"#);
/// assert!(query.include_crates.contains("tokio"));
/// assert!(query.exclude_kinds.contains("timer tick"));
/// assert_eq!(query.show_loners, Some(true));
/// assert!(query.is_valid());
/// ```
pub fn parse(text: &str) -> FilterQuery {
    let mut query = FilterQuery::default();
    for token in lex(text) {
        let parsed = classify(&mut query, token_text(text, &token), token.span);
        query.tokens.push(parsed);
    }
    query
}

fn classify(query: &mut FilterQuery, raw: &str, span: TextRange) -> ParsedToken {
    let (sign, _) = Sign::split(raw);

    // A colon at position zero leaves no room for a key; treat the token
    // as shapeless. This also covers a lone `+` or `-`.
    let colon = match raw.find(':') {
        None | Some(0) => {
            query.diagnostics.report(DiagnosticKind::NotKeyValue, span).emit();
            return ParsedToken {
                raw: raw.to_string(),
                sign,
                key: None,
                value: None,
                valid: false,
                span,
            };
        }
        Some(colon) => colon,
    };

    let sign_len = if sign.is_some() { 1 } else { 0 };
    let key = raw[sign_len..colon].to_string();
    let value = strip_quotes(&raw[colon + 1..]).trim().to_string();
    let key_lc = key.to_lowercase();

    let valid = if value.is_empty() {
        query
            .diagnostics
            .report(DiagnosticKind::EmptyValue, span)
            .message(&key)
            .emit();
        false
    } else {
        match sign {
            Some(sign) => {
                if let Some(axis) = Axis::from_key(&key_lc) {
                    axis_token(query, axis, sign, &value, span)
                } else if let Some(control) = ControlKey::from_key(&key_lc) {
                    control_token(query, control, &value, span)
                } else {
                    unknown_key(query, &key, span)
                }
            }
            None => {
                if let Some(control) = ControlKey::from_key(&key_lc) {
                    control_token(query, control, &value, span)
                } else if Axis::from_key(&key_lc).is_some() {
                    query
                        .diagnostics
                        .report(DiagnosticKind::MissingSign, span)
                        .message(&key)
                        .fix("prefix with `+` to include", format!("+{raw}"))
                        .emit();
                    false
                } else {
                    unknown_key(query, &key, span)
                }
            }
        }
    };

    ParsedToken {
        raw: raw.to_string(),
        sign,
        key: Some(key),
        value: Some(value),
        valid,
        span,
    }
}

fn axis_token(
    query: &mut FilterQuery,
    axis: Axis,
    sign: Sign,
    value: &str,
    span: TextRange,
) -> bool {
    if is_placeholder(value) {
        query
            .diagnostics
            .report(DiagnosticKind::PlaceholderValue, span)
            .message(value)
            .emit();
        return false;
    }

    // Both buckets keep the value; which side wins is a rendering policy,
    // not a parse error. The warning points back at the other token.
    if query.bucket(axis, sign.opposite()).contains(value) {
        let opposing = opposing_span(query, axis, sign.opposite(), value);
        let mut diagnostic = query
            .diagnostics
            .report(DiagnosticKind::ConflictingSigns, span)
            .message(value);
        if let Some(other) = opposing {
            diagnostic =
                diagnostic.related_to(format!("{}d here", sign.opposite().verb()), other);
        }
        diagnostic.emit();
    }

    query.bucket_mut(axis, sign).insert(value.to_string());
    true
}

fn control_token(
    query: &mut FilterQuery,
    control: ControlKey,
    value: &str,
    span: TextRange,
) -> bool {
    match control {
        ControlKey::Loners => match value {
            "on" | "true" | "yes" => {
                query.show_loners = Some(true);
                true
            }
            "off" | "false" | "no" => {
                query.show_loners = Some(false);
                true
            }
            _ => invalid_toggle(query, value, span),
        },
        ControlKey::Source => match value {
            "on" => {
                query.show_source = Some(true);
                true
            }
            "off" => {
                query.show_source = Some(false);
                true
            }
            _ => invalid_toggle(query, value, span),
        },
        ControlKey::ColorBy => match ColorBy::from_value(value) {
            Some(color_by) => {
                query.color_by = Some(color_by);
                true
            }
            None => invalid_choice(query, value, "`colorBy` accepts `process` or `crate`", span),
        },
        ControlKey::GroupBy => match value {
            // `none` is a valid way of asking for no grouping.
            "none" => true,
            _ => match GroupBy::from_value(value) {
                Some(group_by) => {
                    query.group_by = Some(group_by);
                    true
                }
                None => invalid_choice(
                    query,
                    value,
                    "`groupBy` accepts `process`, `crate`, or `none`",
                    span,
                ),
            },
        },
        ControlKey::LabelBy => match LabelBy::from_value(value) {
            Some(label_by) => {
                query.label_by = Some(label_by);
                true
            }
            None => invalid_choice(
                query,
                value,
                "`labelBy` accepts `process`, `crate`, or `location`",
                span,
            ),
        },
        ControlKey::Focus => {
            if is_placeholder(value) {
                query
                    .diagnostics
                    .report(DiagnosticKind::PlaceholderValue, span)
                    .message(value)
                    .emit();
                false
            } else {
                query.focused_node = Some(value.to_string());
                true
            }
        }
    }
}

fn invalid_toggle(query: &mut FilterQuery, value: &str, span: TextRange) -> bool {
    query
        .diagnostics
        .report(DiagnosticKind::InvalidToggle, span)
        .message(value)
        .emit();
    false
}

fn invalid_choice(query: &mut FilterQuery, value: &str, hint: &str, span: TextRange) -> bool {
    query
        .diagnostics
        .report(DiagnosticKind::InvalidChoice, span)
        .message(value)
        .hint(hint)
        .emit();
    false
}

fn unknown_key(query: &mut FilterQuery, key: &str, span: TextRange) -> bool {
    query
        .diagnostics
        .report(DiagnosticKind::UnknownKey, span)
        .message(key)
        .emit();
    false
}

/// Span of the earlier valid token that put `value` in the `sign` bucket
/// of `axis`.
fn opposing_span(query: &FilterQuery, axis: Axis, sign: Sign, value: &str) -> Option<TextRange> {
    query.tokens.iter().find_map(|token| {
        let token_axis = token
            .key
            .as_deref()
            .and_then(|key| Axis::from_key(&key.to_lowercase()))?;
        (token.valid
            && token_axis == axis
            && token.sign == Some(sign)
            && token.value.as_deref() == Some(value))
        .then_some(token.span)
    })
}

/// `<kind>`-style values are suggestion templates, never real filters.
fn is_placeholder(value: &str) -> bool {
    value.len() >= 2 && value.starts_with('<') && value.ends_with('>')
}
