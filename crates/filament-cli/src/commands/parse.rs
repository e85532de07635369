use std::fmt::Write as _;
use std::path::PathBuf;

use filament_filter::key::AXES;
use filament_filter::{FilterQuery, Sign, parse, quote_value};

use super::query_input::load_filter_text;

pub struct ParseArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub format: String,
    pub pretty: bool,
    pub color: bool,
}

pub fn run(args: ParseArgs) {
    let input = load_filter_text(args.query_path.as_deref(), args.query_text.as_deref())
        .unwrap_or_else(|msg| {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        });

    let query = parse(&input.text);

    // Parsing is total: invalid tokens become diagnostics, never a failure.
    // The structure goes to stdout either way.
    if !query.diagnostics().is_empty() {
        let mut printer = query
            .diagnostics()
            .printer()
            .source(&input.text)
            .colored(args.color);
        if let Some(path) = input.path.as_deref() {
            printer = printer.path(path);
        }
        eprintln!("{}", printer.render());
    }

    match args.format.as_str() {
        "json" => {
            let output = if args.pretty {
                serde_json::to_string_pretty(&query)
            } else {
                serde_json::to_string(&query)
            };
            match output {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("error: JSON serialization failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        _ => print!("{}", render_text(&query)),
    }
}

/// Human-readable dump: one line per non-empty bucket, then the scalars.
fn render_text(query: &FilterQuery) -> String {
    let mut out = String::new();

    for axis in AXES {
        for sign in [Sign::Include, Sign::Exclude] {
            let bucket = query.bucket(axis, sign);
            if bucket.is_empty() {
                continue;
            }
            let values: Vec<String> = bucket.iter().map(|value| quote_value(value)).collect();
            let _ = writeln!(out, "{} {}: {}", sign.verb(), axis.key(), values.join(", "));
        }
    }

    if let Some(loners) = query.show_loners {
        let _ = writeln!(out, "loners: {}", on_off(loners));
    }
    if let Some(source) = query.show_source {
        let _ = writeln!(out, "source: {}", on_off(source));
    }
    if let Some(color_by) = query.color_by {
        let _ = writeln!(out, "colorBy: {}", color_by.as_str());
    }
    if let Some(group_by) = query.group_by {
        let _ = writeln!(out, "groupBy: {}", group_by.as_str());
    }
    if let Some(label_by) = query.label_by {
        let _ = writeln!(out, "labelBy: {}", label_by.as_str());
    }
    if let Some(focus) = &query.focused_node {
        let _ = writeln!(out, "focus: {}", quote_value(focus));
    }

    out
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(input: &str) -> String {
        render_text(&parse(input))
    }

    #[test]
    fn buckets_come_before_scalars() {
        insta::assert_snapshot!(
            snapshot(r#"+crate:tokio +crate:hyper -kind:"timer tick" loners:on colorBy:process focus:node-7"#),
            @r#"
        include crate: tokio, hyper
        exclude kind: "timer tick"
        loners: on
        colorBy: process
        focus: node-7
        "#
        );
    }

    #[test]
    fn both_signs_of_one_axis_stay_adjacent() {
        insta::assert_snapshot!(snapshot("+crate:tokio -crate:hyper +node:n1"), @r"
        include node: n1
        include crate: tokio
        exclude crate: hyper
        ");
    }

    #[test]
    fn empty_query_renders_nothing() {
        insta::assert_snapshot!(snapshot(""), @"");
    }

    #[test]
    fn invalid_tokens_contribute_nothing() {
        insta::assert_snapshot!(snapshot("bogus +crate:tokio colour:red"), @"include crate: tokio");
    }
}
