//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs that mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors that pull relevant fields (ignoring hidden ones)
//! - `Into<*Args>` impls to bridge dispatch → command handlers

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::parse::ParseArgs;
use crate::commands::suggest::SuggestArgs;
use crate::commands::tokens::TokensArgs;

pub struct TokensParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub spans: bool,
    // Note: color, format, compact, strict are parsed but not extracted
    // (unified flags)
}

impl TokensParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            spans: m.get_flag("spans"),
        }
    }
}

impl From<TokensParams> for TokensArgs {
    fn from(p: TokensParams) -> Self {
        Self {
            query_path: p.query_path,
            query_text: p.query_text,
            spans: p.spans,
        }
    }
}

pub struct CheckParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub strict: bool,
    pub color: ColorChoice,
    // Note: format, compact, spans are parsed but not extracted (unified flags)
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            query_path: p.query_path,
            query_text: p.query_text,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct ParseParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub format: String,
    pub compact: bool,
    pub color: ColorChoice,
    // Note: spans, strict are parsed but not extracted (unified flags)
}

impl ParseParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            format: m
                .get_one::<String>("format")
                .cloned()
                .unwrap_or_else(|| "text".to_string()),
            compact: m.get_flag("compact"),
            color: parse_color(m),
        }
    }
}

impl From<ParseParams> for ParseArgs {
    fn from(p: ParseParams) -> Self {
        // Pretty by default when stdout is a TTY, unless --compact is passed
        let pretty = !p.compact && std::io::IsTerminal::is_terminal(&std::io::stdout());

        Self {
            query_path: p.query_path,
            query_text: p.query_text,
            format: p.format,
            pretty,
            color: p.color.should_colorize(),
        }
    }
}

pub struct SuggestParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub catalog: Option<PathBuf>,
    pub limit: Option<usize>,
    pub format: String,
    pub compact: bool,
    // Note: color, spans, strict are parsed but not extracted (unified flags)
}

impl SuggestParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            catalog: m.get_one::<PathBuf>("catalog").cloned(),
            limit: m.get_one::<usize>("limit").copied(),
            format: m
                .get_one::<String>("format")
                .cloned()
                .unwrap_or_else(|| "text".to_string()),
            compact: m.get_flag("compact"),
        }
    }
}

impl From<SuggestParams> for SuggestArgs {
    fn from(p: SuggestParams) -> Self {
        // Pretty by default when stdout is a TTY, unless --compact is passed
        let pretty = !p.compact && std::io::IsTerminal::is_terminal(&std::io::stdout());

        Self {
            query_path: p.query_path,
            query_text: p.query_text,
            catalog: p.catalog,
            limit: p.limit,
            format: p.format,
            pretty,
        }
    }
}

/// Parse --color flag into ColorChoice.
fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
