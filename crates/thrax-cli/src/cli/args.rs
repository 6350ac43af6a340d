//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so every command composes the same
//! definitions.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Grammar file (positional, `-` for stdin).
pub fn source_path_arg() -> Arg {
    Arg::new("source_path")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Grammar file (use \"-\" for stdin)")
}

/// Inline grammar text (-e/--expr).
pub fn source_text_arg() -> Arg {
    Arg::new("source_text")
        .short('e')
        .long("expr")
        .value_name("TEXT")
        .conflicts_with("source_path")
        .help("Inline grammar text")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize diagnostics")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Show the syntax tree (--cst).
pub fn cst_arg() -> Arg {
    Arg::new("cst")
        .long("cst")
        .action(ArgAction::SetTrue)
        .conflicts_with("json")
        .help("Show the concrete syntax tree")
}

/// Variable table as JSON (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print the variable table as JSON")
}

/// Include trivia tokens (--raw).
pub fn raw_arg() -> Arg {
    Arg::new("raw")
        .long("raw")
        .action(ArgAction::SetTrue)
        .help("Include trivia tokens (whitespace, comments)")
}

/// Show source positions (--spans).
pub fn spans_arg() -> Arg {
    Arg::new("spans")
        .long("spans")
        .action(ArgAction::SetTrue)
        .help("Show source positions")
}

/// Execution fuel limit (--fuel).
pub fn fuel_arg() -> Arg {
    Arg::new("fuel")
        .long("fuel")
        .value_name("N")
        .default_value("1000000")
        .value_parser(value_parser!(u32))
        .help("Parser fuel limit (tokens consumed)")
}
