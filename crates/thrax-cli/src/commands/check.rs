use super::run_common::{compile_or_exit, load_or_exit, report};
use super::source_loader::SourceInput;

pub struct CheckArgs {
    pub input: SourceInput,
    pub strict: bool,
    pub fuel: u32,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let source = load_or_exit(&args.input);
    let compilation = compile_or_exit(&source, args.fuel);

    let is_valid = if args.strict {
        compilation.diagnostics().is_empty()
    } else {
        compilation.is_valid()
    };

    if !is_valid {
        report(&compilation, &args.input, args.color);
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
