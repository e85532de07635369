//! Lexer for filter query text.
//!
//! Splitting rules: unescaped whitespace outside double quotes ends a token,
//! a backslash escapes the next character (inside quotes too), and an
//! unterminated quote runs to the end of input. There is no failure case;
//! every string lexes.
//!
//! Tokens are spans into the source. Quotes and escapes stay verbatim in the
//! token text; values are unquoted later, during parsing.

use text_size::TextRange;

/// A token span. Text is sliced on demand via [`token_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub span: TextRange,
}

impl Token {
    fn new(start: usize, end: usize) -> Self {
        let span = TextRange::new((start as u32).into(), (end as u32).into());
        Self { span }
    }
}

/// Splits source text into span tokens in a single pass.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    let mut in_quotes = false;
    let mut escaped = false;

    for (pos, c) in source.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => {
                escaped = true;
                start.get_or_insert(pos);
            }
            '"' => {
                in_quotes = !in_quotes;
                start.get_or_insert(pos);
            }
            c if c.is_whitespace() && !in_quotes => {
                if let Some(from) = start.take() {
                    tokens.push(Token::new(from, pos));
                }
            }
            _ => {
                start.get_or_insert(pos);
            }
        }
    }
    if let Some(from) = start {
        tokens.push(Token::new(from, source.len()));
    }

    tokens
}

/// Retrieves the text of a token. O(1) slice into the source.
#[inline]
pub fn token_text<'q>(source: &'q str, token: &Token) -> &'q str {
    &source[std::ops::Range::<usize>::from(token.span)]
}

/// Tokenizes into owned strings, the editor-facing convenience form.
///
/// # Examples
///
/// ```
/// use filament_filter::tokenize;
///
/// let tokens = tokenize(r#" +crate:tokio  -kind:"timer tick" "#);
/// assert_eq!(tokens, vec!["+crate:tokio", r#"-kind:"timer tick""#]);
/// ```
pub fn tokenize(source: &str) -> Vec<String> {
    lex(source)
        .iter()
        .map(|token| token_text(source, token).to_string())
        .collect()
}

/// Appends one token to existing filter text, normalizing separators.
///
/// Entry point for callers outside the editor widget, e.g. a context-menu
/// "exclude this crate" action. Empty tokens are ignored.
pub fn append_token(text: &str, token: &str) -> String {
    let token = token.trim();
    if token.is_empty() {
        return text.to_string();
    }
    let mut tokens = tokenize(text);
    tokens.push(token.to_string());
    tokens.join(" ")
}
