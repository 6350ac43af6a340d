//! Thrax compiler front end: parser, expression builder and canonical
//! serializer.
//!
//! - `parser` - lexer, CST, and typed AST
//! - `re` - regular-expression node model and literal unescaping
//! - `build` - AST to variable table, with literal and class folding
//! - `emit` - usage counting and the canonical `name = expr` text
//! - `diagnostics` - error and warning reporting
//! - `compilation` - high-level facade over the whole pipeline

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod build;
pub mod compilation;
pub mod diagnostics;
pub mod emit;
pub mod parser;
pub mod re;

#[cfg(test)]
pub mod test_utils;

pub use build::Program;
pub use compilation::{Compilation, CompilationPrinter};
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use emit::{SerializationContext, UsageCounts};
pub use re::Re;

/// Errors that stop compilation before a program exists.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Execution fuel exhausted (too many parser operations).
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// Recursion fuel exhausted (input nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    #[error("compilation failed with {} errors", .0.error_count())]
    CompileError(Diagnostics),
}

pub type Result<T> = std::result::Result<T, Error>;
