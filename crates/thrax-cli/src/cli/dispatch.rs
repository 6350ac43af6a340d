//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::compile::CompileArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::source_loader::SourceInput;

pub struct CompileParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub fuel: u32,
    pub color: ColorChoice,
}

impl CompileParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            fuel: parse_fuel(m),
            color: parse_color(m),
        }
    }
}

impl From<CompileParams> for CompileArgs {
    fn from(p: CompileParams) -> Self {
        Self {
            input: SourceInput::new(p.source_path, p.source_text),
            fuel: p.fuel,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub strict: bool,
    pub fuel: u32,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            strict: m.get_flag("strict"),
            fuel: parse_fuel(m),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            input: SourceInput::new(p.source_path, p.source_text),
            strict: p.strict,
            fuel: p.fuel,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub cst: bool,
    pub json: bool,
    pub raw: bool,
    pub spans: bool,
    pub fuel: u32,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            cst: m.get_flag("cst"),
            json: m.get_flag("json"),
            raw: m.get_flag("raw"),
            spans: m.get_flag("spans"),
            fuel: parse_fuel(m),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            input: SourceInput::new(p.source_path, p.source_text),
            cst: p.cst,
            json: p.json,
            raw: p.raw,
            spans: p.spans,
            fuel: p.fuel,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn parse_fuel(m: &ArgMatches) -> u32 {
    m.get_one::<u32>("fuel").copied().unwrap_or(1_000_000)
}
