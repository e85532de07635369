//! Quoting helpers for filter values.
//!
//! A value containing whitespace or a double quote cannot survive
//! tokenization bare. [`quote_value`] and [`strip_quotes`] are the shared
//! round-trip pair: the parser strips, the suggestion engine and
//! programmatic token builders quote.

/// Quotes a value when it would not survive tokenization as-is.
///
/// Identity for values without whitespace or `"`. Everything else is
/// wrapped in double quotes with internal backslashes and quotes escaped.
///
/// # Examples
///
/// ```
/// use filament_filter::quote_value;
///
/// assert_eq!(quote_value("tokio"), "tokio");
/// assert_eq!(quote_value("my crate"), r#""my crate""#);
/// ```
pub fn quote_value(value: &str) -> String {
    if value.chars().any(|c| c.is_whitespace() || c == '"') {
        quote_always(value)
    } else {
        value.to_string()
    }
}

/// Unconditionally wraps in double quotes, escaping `\` and `"`.
///
/// The suggestion engine emits axis values through this so completed tokens
/// are uniformly quoted. Prefer [`quote_value`] everywhere else.
pub(crate) fn quote_always(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if c == '\\' || c == '"' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Strips one pair of surrounding double quotes and unescapes the inside.
///
/// Left inverse of [`quote_value`]: `strip_quotes(quote_value(v)) == v` for
/// every `v`. Values that are not fully quoted come back unchanged.
pub fn strip_quotes(value: &str) -> String {
    let Some(inner) = value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return value.to_string();
    };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push(chars.next().unwrap_or('\\')),
            other => out.push(other),
        }
    }
    out
}
