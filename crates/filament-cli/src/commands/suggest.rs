use std::path::PathBuf;

use filament_filter::{Catalog, suggest, tokenize};

use super::query_input::load_filter_text;

pub struct SuggestArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub catalog: Option<PathBuf>,
    pub limit: Option<usize>,
    pub format: String,
    pub pretty: bool,
}

pub fn run(args: SuggestArgs) {
    let input = load_filter_text(args.query_path.as_deref(), args.query_text.as_deref())
        .unwrap_or_else(|msg| {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        });

    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path).unwrap_or_else(|e| {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }),
        // No catalog: keys and control values still complete.
        None => Catalog::default(),
    };

    let (existing, fragment) = split_fragment(&input.text);
    let mut suggestions = suggest(&fragment, &existing, &catalog);
    if let Some(limit) = args.limit {
        suggestions.truncate(limit);
    }

    match args.format.as_str() {
        "json" => {
            let output = if args.pretty {
                serde_json::to_string_pretty(&suggestions)
            } else {
                serde_json::to_string(&suggestions)
            };
            match output {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("error: JSON serialization failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        _ => {
            for suggestion in &suggestions {
                println!("{}\t{}", suggestion.token, suggestion.description);
            }
        }
    }
}

/// Splits filter text into committed tokens and the fragment being typed.
///
/// The last token is the fragment unless the text ends in whitespace, which
/// means the user finished it and is starting a fresh one.
fn split_fragment(text: &str) -> (Vec<String>, String) {
    let mut tokens = tokenize(text);
    if text.ends_with(char::is_whitespace) {
        return (tokens, String::new());
    }
    let fragment = tokens.pop().unwrap_or_default();
    (tokens, fragment)
}
