//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("thrax")
        .about("Compile Thrax grammars to canonical regular expressions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(compile_command())
        .subcommand(check_command())
        .subcommand(dump_command())
}

fn with_source_args(cmd: Command) -> Command {
    cmd.arg(source_path_arg())
        .arg(source_text_arg())
        .arg(fuel_arg())
        .arg(color_arg())
}

/// Print the canonical serialization.
pub fn compile_command() -> Command {
    let cmd = Command::new("compile")
        .about("Print the canonical serialization of a grammar")
        .override_usage(
            "\
  thrax compile <FILE>
  thrax compile -e <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  thrax compile digits.grm              # from file
  cat digits.grm | thrax compile -      # from stdin
  thrax compile -e "d = '0' | '1';"     # inline grammar"#,
        );

    with_source_args(cmd)
}

/// Validate a grammar.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate a grammar")
        .override_usage(
            "\
  thrax check <FILE> [--strict]
  thrax check -e <TEXT> [--strict]",
        )
        .after_help(
            r#"EXAMPLES:
  thrax check digits.grm                # errors only
  thrax check digits.grm --strict       # warnings fail too"#,
        )
        .arg(strict_arg());

    with_source_args(cmd)
}

/// Show the syntax tree or the variable table.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Show the syntax tree or the built variable table")
        .override_usage(
            "\
  thrax dump <FILE> [--cst | --json]
  thrax dump -e <TEXT> [--cst | --json]",
        )
        .after_help(
            r#"EXAMPLES:
  thrax dump digits.grm                 # definitions with usage counts
  thrax dump digits.grm --cst --spans   # syntax tree with positions
  thrax dump digits.grm --json          # variable table as JSON"#,
        )
        .arg(cst_arg())
        .arg(json_arg())
        .arg(raw_arg())
        .arg(spans_arg());

    with_source_args(cmd)
}
