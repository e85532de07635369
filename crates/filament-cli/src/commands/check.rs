use std::path::PathBuf;

use filament_filter::parse;

use super::query_input::load_filter_text;

pub struct CheckArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let input = load_filter_text(args.query_path.as_deref(), args.query_text.as_deref())
        .unwrap_or_else(|msg| {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        });

    let query = parse(&input.text);
    let diagnostics = query.diagnostics();

    let failed = if args.strict {
        !diagnostics.is_empty()
    } else {
        diagnostics.has_errors()
    };

    if failed {
        let mut printer = diagnostics
            .printer()
            .source(&input.text)
            .colored(args.color);
        if let Some(path) = input.path.as_deref() {
            printer = printer.path(path);
        }
        eprintln!("{}", printer.render());
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
