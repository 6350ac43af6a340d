use super::run_common::{compile_or_exit, load_or_exit, report};
use super::source_loader::SourceInput;

pub struct CompileArgs {
    pub input: SourceInput,
    pub fuel: u32,
    pub color: bool,
}

pub fn run(args: CompileArgs) {
    let source = load_or_exit(&args.input);
    let compilation = compile_or_exit(&source, args.fuel);

    report(&compilation, &args.input, args.color);
    if !compilation.is_valid() {
        std::process::exit(1);
    }

    print!("{}", compilation.to_solomonoff());
}
