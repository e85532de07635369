mod cli;
mod commands;

use cli::{CheckParams, ParseParams, SuggestParams, TokensParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("tokens", m)) => {
            let params = TokensParams::from_matches(m);
            commands::tokens::run(params.into());
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("parse", m)) => {
            let params = ParseParams::from_matches(m);
            commands::parse::run(params.into());
        }
        Some(("suggest", m)) => {
            let params = SuggestParams::from_matches(m);
            commands::suggest::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
