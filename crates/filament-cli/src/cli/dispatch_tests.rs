//! Tests for CLI dispatch logic.
//!
//! These tests verify:
//! 1. Unified flags: every command accepts the common flag set without error
//! 2. Help visibility: hidden flags don't appear in --help
//! 3. Params extraction: correct fields are extracted from ArgMatches

use std::path::PathBuf;

use super::*;
use crate::cli::commands::{check_command, parse_command, suggest_command, tokens_command};

#[test]
fn cli_requires_a_subcommand() {
    let result = build_cli().try_get_matches_from(["filament"]);
    assert!(result.is_err(), "bare invocation should print help");
}

#[test]
fn cli_routes_subcommands() {
    let m = build_cli()
        .try_get_matches_from(["filament", "tokens", "-q", "+crate:tokio"])
        .unwrap();
    assert_eq!(m.subcommand_name(), Some("tokens"));
}

#[test]
fn tokens_accepts_output_flags() {
    let cmd = tokens_command();
    let result = cmd.try_get_matches_from([
        "tokens",
        "query.flt",
        "--format",
        "json",
        "--compact",
        "--color",
        "never",
    ]);
    assert!(
        result.is_ok(),
        "tokens should accept output flags: {:?}",
        result.err()
    );

    let m = result.unwrap();
    let params = TokensParams::from_matches(&m);

    // Query path is extracted
    assert_eq!(params.query_path, Some(PathBuf::from("query.flt")));
    // format, compact, color are parsed but not in TokensParams (that's the point)
}

#[test]
fn tokens_params_extract() {
    let cmd = tokens_command();
    let m = cmd
        .try_get_matches_from(["tokens", "-q", "+crate:tokio -k", "--spans"])
        .unwrap();
    let params = TokensParams::from_matches(&m);

    assert_eq!(params.query_path, None);
    assert_eq!(params.query_text, Some("+crate:tokio -k".to_string()));
    assert!(params.spans);
}

#[test]
fn check_accepts_output_flags() {
    let cmd = check_command();
    let result =
        cmd.try_get_matches_from(["check", "query.flt", "--format", "json", "--compact"]);
    assert!(
        result.is_ok(),
        "check should accept output flags: {:?}",
        result.err()
    );
}

#[test]
fn check_params_extract() {
    let cmd = check_command();
    let m = cmd
        .try_get_matches_from(["check", "-q", "crate:a", "--strict", "--color", "never"])
        .unwrap();
    let params = CheckParams::from_matches(&m);

    assert_eq!(params.query_text, Some("crate:a".to_string()));
    assert!(params.strict);
    assert!(matches!(params.color, ColorChoice::Never));
    assert!(!params.color.should_colorize());
}

#[test]
fn parse_accepts_check_flags() {
    let cmd = parse_command();
    let result = cmd.try_get_matches_from(["parse", "query.flt", "--strict", "--spans"]);
    assert!(
        result.is_ok(),
        "parse should accept check flags: {:?}",
        result.err()
    );
}

#[test]
fn parse_format_defaults_to_text() {
    let cmd = parse_command();
    let m = cmd.try_get_matches_from(["parse", "-q", "loners:on"]).unwrap();
    let params = ParseParams::from_matches(&m);

    assert_eq!(params.format, "text");
    assert!(!params.compact);
}

#[test]
fn parse_rejects_unknown_formats() {
    let cmd = parse_command();
    let result = cmd.try_get_matches_from(["parse", "-q", "loners:on", "--format", "yaml"]);
    assert!(result.is_err(), "--format only takes text or json");
}

#[test]
fn suggest_accepts_output_flags() {
    let cmd = suggest_command();
    let result = cmd.try_get_matches_from(["suggest", "-q", "+cr", "--compact", "--color", "auto"]);
    assert!(
        result.is_ok(),
        "suggest should accept output flags: {:?}",
        result.err()
    );
}

#[test]
fn suggest_params_extract() {
    let cmd = suggest_command();
    let m = cmd
        .try_get_matches_from([
            "suggest",
            "-q",
            "+crate:",
            "--catalog",
            "graph.json",
            "--limit",
            "5",
            "--format",
            "json",
        ])
        .unwrap();
    let params = SuggestParams::from_matches(&m);

    assert_eq!(params.query_text, Some("+crate:".to_string()));
    assert_eq!(params.catalog, Some(PathBuf::from("graph.json")));
    assert_eq!(params.limit, Some(5));
    assert_eq!(params.format, "json");
}

#[test]
fn tokens_help_hides_unified_flags() {
    let mut cmd = tokens_command();
    let help = cmd.render_help().to_string();

    assert!(
        !help.contains("--format"),
        "tokens help should not show --format"
    );
    assert!(
        !help.contains("--compact"),
        "tokens help should not show --compact"
    );
    assert!(
        !help.contains("--color"),
        "tokens help should not show --color"
    );
    assert!(help.contains("--spans"), "tokens help SHOULD show --spans");
}

#[test]
fn check_help_hides_output_flags() {
    let mut cmd = check_command();
    let help = cmd.render_help().to_string();

    assert!(
        !help.contains("--format"),
        "check help should not show --format"
    );
    assert!(
        !help.contains("--compact"),
        "check help should not show --compact"
    );
    assert!(
        !help.contains("--spans"),
        "check help should not show --spans"
    );
    assert!(help.contains("--strict"), "check help SHOULD show --strict");
}

#[test]
fn suggest_help_hides_diagnostic_flags() {
    let mut cmd = suggest_command();
    let help = cmd.render_help().to_string();

    assert!(
        !help.contains("--color"),
        "suggest help should not show --color"
    );
    assert!(
        !help.contains("--strict"),
        "suggest help should not show --strict"
    );
    assert!(
        help.contains("--catalog"),
        "suggest help SHOULD show --catalog"
    );
    assert!(help.contains("--limit"), "suggest help SHOULD show --limit");
}

#[test]
fn query_text_and_path_can_both_be_given() {
    let cmd = check_command();
    let m = cmd
        .try_get_matches_from(["check", "query.flt", "-q", "loners:on"])
        .unwrap();
    let params = CheckParams::from_matches(&m);

    // Inline text wins at load time; both are extracted.
    assert_eq!(params.query_path, Some(PathBuf::from("query.flt")));
    assert_eq!(params.query_text, Some("loners:on".to_string()));
}
