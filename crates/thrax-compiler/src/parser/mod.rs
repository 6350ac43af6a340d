//! Parser infrastructure for Thrax sources.
//!
//! # Architecture
//!
//! The parser produces a lossless concrete syntax tree via Rowan's green tree
//! builder:
//!
//! - Zero-copy lexing: tokens carry spans, text is sliced only when building tree nodes
//! - Trivia buffering: whitespace and `#` comments are attached as leading trivia
//! - Checkpoint-based wrapping: binary operators and postfix markers retroactively
//!   wrap the operand already built; a chain of one operator is one flat node
//!
//! # Recovery
//!
//! The parser always produces a tree:
//!
//! 1. Tokens that cannot start a statement are wrapped in `Error` nodes up to the next
//!    statement boundary (a `;`, a keyword, or `name =`)
//! 2. Missing expected tokens emit a diagnostic but are not consumed
//! 3. Unclosed delimiters report the whole region from the opening token
//! 4. A string without a closing quote is one error covering the rest of the input
//!
//! Fuel exhaustion (exec fuel, recursion fuel) returns an actual error.

pub mod ast;
pub mod cst;
pub mod lexer;

mod core;
mod errors;
mod grammar;
mod invariants;

#[cfg(test)]
mod ast_tests;
#[cfg(test)]
mod grammar_tests;

pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken, ThraxLang};

pub use ast::{
    Args, Call, Closure, Compose, Concat, Diff, Expr, FuncDef, Import, Nested, Output, Params,
    Ref, Repeat, Return, Root, Stmt, Str, Union, VarDef, Weight,
};

pub use core::{ParseResult, Parser};

use crate::Result;
use lexer::lex;

/// Parses with default limits (no fuel).
pub fn parse(source: &str) -> Result<ParseResult> {
    Parser::new(source, lex(source)).parse()
}
