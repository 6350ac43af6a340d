//! Steps shared by every command: load, compile, report.

use thrax_compiler::Compilation;

use super::source_loader::SourceInput;

pub fn load_or_exit(input: &SourceInput) -> String {
    match input.load() {
        Ok(source) => source,
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    }
}

/// Fuel exhaustion is the only hard failure; everything else is a diagnostic.
pub fn compile_or_exit(source: &str, fuel: u32) -> Compilation<'_> {
    match Compilation::new(source).with_exec_fuel(Some(fuel)).exec() {
        Ok(compilation) => compilation,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Renders diagnostics to stderr, cascades removed.
pub fn report(compilation: &Compilation<'_>, input: &SourceInput, color: bool) {
    let diagnostics = compilation.diagnostics().filtered();
    if diagnostics.is_empty() {
        return;
    }
    let name = input.display_name();
    eprintln!(
        "{}",
        diagnostics
            .printer()
            .source(compilation.source())
            .path(&name)
            .colored(color)
            .summary(true)
            .render()
    );
}
