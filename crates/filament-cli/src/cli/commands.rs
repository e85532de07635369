//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.
//! The unified flags feature is implemented here: every command accepts the
//! common flag set, with irrelevant ones hidden from `--help`.

use clap::Command;

use super::args::*;

/// Add hidden JSON output args (for commands with a fixed output shape).
fn with_hidden_output_args(cmd: Command) -> Command {
    cmd.arg(format_arg().hide(true)).arg(compact_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("filament")
        .about("Filter query language for the concurrency graph visualizer")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(tokens_command())
        .subcommand(check_command())
        .subcommand(parse_command())
        .subcommand(suggest_command())
}

/// Dump lexed tokens, one per line.
///
/// Accepts the unified flag set, but only uses query/spans.
pub fn tokens_command() -> Command {
    let cmd = Command::new("tokens")
        .about("Dump lexed tokens, one per line")
        .override_usage(
            "\
  filament tokens <FILE>
  filament tokens -q <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  filament tokens -q '+crate:tokio -kind:"timer tick"'
  filament tokens -q 'focus:node-7 loners:on' --spans
  filament tokens query.flt
  echo '+crate:tokio' | filament tokens -"#,
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(spans_arg());

    // Hidden unified flags
    with_hidden_output_args(cmd.arg(color_arg().hide(true)).arg(strict_arg().hide(true)))
}

/// Validate filter text.
///
/// Accepts the unified flag set, but only uses query/strict/color.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate filter text")
        .override_usage(
            "\
  filament check <FILE>
  filament check -q <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  filament check query.flt
  filament check -q '+crate:tokio colour:red'
  filament check -q 'crate:a' --strict"#,
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(strict_arg())
        .arg(color_arg());

    // Hidden unified flags
    with_hidden_output_args(cmd.arg(spans_arg().hide(true)))
}

/// Show the parsed predicate sets and scalar controls.
///
/// Accepts the unified flag set, but only uses query/format/compact/color.
pub fn parse_command() -> Command {
    let cmd = Command::new("parse")
        .about("Show the parsed predicate sets and scalar controls")
        .override_usage(
            "\
  filament parse <FILE>
  filament parse -q <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  filament parse -q '+crate:tokio -crate:hyper colorBy:process'
  filament parse -q 'focus:node-7' --format json
  filament parse query.flt --format json --compact"#,
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(format_arg())
        .arg(compact_arg())
        .arg(color_arg());

    // Hidden unified flags
    cmd.arg(spans_arg().hide(true)).arg(strict_arg().hide(true))
}

/// Complete the trailing fragment of filter text.
///
/// Accepts the unified flag set, but only uses query/catalog/limit/format.
pub fn suggest_command() -> Command {
    let cmd = Command::new("suggest")
        .about("Complete the trailing fragment of filter text")
        .override_usage(
            "\
  filament suggest <FILE>
  filament suggest -q <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  filament suggest -q '+cr'
  filament suggest -q '+crate:' --catalog graph.json
  filament suggest -q '+crate:tokio ' --limit 5    # trailing space: fresh fragment
  filament suggest -q '-k' --format json"#,
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(catalog_arg())
        .arg(limit_arg())
        .arg(format_arg());

    // Hidden unified flags
    cmd.arg(compact_arg().hide(true))
        .arg(color_arg().hide(true))
        .arg(spans_arg().hide(true))
        .arg(strict_arg().hide(true))
}
