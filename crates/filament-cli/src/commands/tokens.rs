use std::path::PathBuf;

use filament_filter::{lex, token_text};

use super::query_input::load_filter_text;

pub struct TokensArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub spans: bool,
}

pub fn run(args: TokensArgs) {
    let input = load_filter_text(args.query_path.as_deref(), args.query_text.as_deref())
        .unwrap_or_else(|msg| {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        });

    for token in lex(&input.text) {
        let text = token_text(&input.text, &token);
        if args.spans {
            println!("{:?}\t{}", token.span, text);
        } else {
            println!("{}", text);
        }
    }
}
