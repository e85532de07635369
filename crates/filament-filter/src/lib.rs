//! Filter query language and chip-editor core for the Filament
//! concurrency-snapshot visualizer.
//!
//! Filament renders tasks, channels, locks, and RPC edges as a live graph,
//! filtered through a tiny query language typed into a chip input: signed
//! axis predicates (`+crate:tokio`, `-kind:"timer tick"`) plus scalar
//! display controls (`loners:on`, `colorBy:process`, `focus:node-7`).
//!
//! This crate is the pure core behind that widget: the [tokenizer](tokenize),
//! the total and lossless [parser](parse), the context-sensitive
//! [suggestion engine](suggest), and the [editor state machine](EditorState)
//! the widget drives. No I/O and no UI; the host owns both.
//!
//! # Example
//!
//! ```
//! use filament_filter::parse;
//!
//! let query = parse(r#"+crate:tokio -crate:"my crate" loners:on"#);
//! assert!(query.include_crates.contains("tokio"));
//! assert!(query.exclude_crates.contains("my crate"));
//! assert_eq!(query.show_loners, Some(true));
//! assert!(query.is_valid());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod catalog;
pub mod diagnostics;
pub mod editor;
pub mod key;
pub mod lexer;
pub mod parser;
pub mod quote;
pub mod suggest;

#[cfg(test)]
mod suggest_tests;

use std::path::PathBuf;

pub use catalog::{Catalog, EntityRef, LabelEntry};
pub use diagnostics::{DiagnosticKind, DiagnosticMessage, Diagnostics, DiagnosticsPrinter, Severity};
pub use editor::{EchoGuard, EditorAction, EditorState};
pub use key::{Axis, ColorBy, ControlKey, GroupBy, LabelBy, Sign};
pub use lexer::{append_token, lex, token_text, tokenize};
pub use parser::{FilterQuery, ParsedToken, parse};
pub use quote::{quote_value, strip_quotes};
pub use suggest::{SUGGESTION_WINDOW, Suggestion, suggest};

/// Errors from catalog loading. The query core itself never fails: bad
/// filter text parses into invalid tokens plus diagnostics, not an `Err`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read catalog `{}`: {source}", path.display())]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog JSON: {0}")]
    CatalogParse(#[from] serde_json::Error),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;
