use super::run_common::{compile_or_exit, load_or_exit, report};
use super::source_loader::SourceInput;

pub struct DumpArgs {
    pub input: SourceInput,
    pub cst: bool,
    pub json: bool,
    pub raw: bool,
    pub spans: bool,
    pub fuel: u32,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let source = load_or_exit(&args.input);
    let compilation = compile_or_exit(&source, args.fuel);
    report(&compilation, &args.input, args.color);

    // The tree exists even for broken input.
    if args.cst {
        let printer = compilation
            .printer()
            .with_trivia(args.raw)
            .with_spans(args.spans);
        print!("{}", printer.dump());
        return;
    }

    if !compilation.is_valid() {
        std::process::exit(1);
    }

    if args.json {
        match serde_json::to_string_pretty(compilation.program()) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    print!("{}", compilation.printer().only_symbols(true).dump());
}
