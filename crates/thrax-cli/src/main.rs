mod cli;
mod commands;

use cli::{CheckParams, CompileParams, DumpParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("compile", m)) => {
            let params = CompileParams::from_matches(m);
            commands::compile::run(params.into());
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
