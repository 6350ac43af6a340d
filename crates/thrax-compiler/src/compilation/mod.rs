//! Compilation pipeline.
//!
//! Stages: parse → build. Each stage keeps its own diagnostics. A program is
//! built even when the source has syntax errors; use `is_valid()` or
//! [`into_program`](Compilation::into_program) to reject those.

mod dump;
mod printer;


pub use printer::CompilationPrinter;

use std::rc::Rc;

use indexmap::IndexMap;
use rowan::GreenNodeBuilder;
use thrax_core::{Alphabet, UnicodeAlphabet};

use crate::build::{ExprBuilder, Program};
use crate::diagnostics::Diagnostics;
use crate::parser::cst::SyntaxKind;
use crate::parser::lexer::lex;
use crate::parser::{ParseResult, Parser, Root, SyntaxNode};
use crate::{Error, Result};

const DEFAULT_EXEC_FUEL: u32 = 1_000_000;
const DEFAULT_RECURSION_FUEL: u32 = 4096;

/// A parsed and built Thrax source.
///
/// Create with [`new`](Self::new), optionally configure fuel limits and the
/// alphabet, then call [`exec`](Self::exec).
#[derive(Debug, Clone)]
pub struct Compilation<'a> {
    source: &'a str,
    root: Root,
    program: Program,
    exec_fuel: Option<u32>,
    recursion_fuel: Option<u32>,
    exec_fuel_consumed: u32,
    parse_diagnostics: Diagnostics,
    build_diagnostics: Diagnostics,
}

fn empty_root() -> Root {
    let mut builder = GreenNodeBuilder::new();
    builder.start_node(SyntaxKind::Root.into());
    builder.finish_node();
    let green = builder.finish();
    Root::cast(SyntaxNode::new_root(green)).expect("we just built a Root node")
}

impl<'a> Compilation<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            root: empty_root(),
            program: Program::new(IndexMap::new(), Rc::new(UnicodeAlphabet)),
            exec_fuel: Some(DEFAULT_EXEC_FUEL),
            recursion_fuel: Some(DEFAULT_RECURSION_FUEL),
            exec_fuel_consumed: 0,
            parse_diagnostics: Diagnostics::new(),
            build_diagnostics: Diagnostics::new(),
        }
    }

    /// Set execution fuel limit. None = infinite.
    ///
    /// Execution fuel never replenishes. It protects against large inputs.
    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel = limit;
        self
    }

    /// Set recursion depth limit. None = infinite.
    ///
    /// Recursion fuel restores when exiting recursion. It protects against
    /// deeply nested groups.
    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel = limit;
        self
    }

    /// Alphabet used to fold character classes. Defaults to all of Unicode.
    pub fn with_alphabet(mut self, alphabet: impl Alphabet + 'static) -> Self {
        self.program = Program::new(IndexMap::new(), Rc::new(alphabet));
        self
    }

    /// Parse and build.
    ///
    /// Returns `Err` only if fuel limits are exceeded. Everything else is a
    /// diagnostic.
    pub fn exec(mut self) -> Result<Self> {
        self.try_parse()?;
        self.build();
        Ok(self)
    }

    fn try_parse(&mut self) -> Result<()> {
        let tokens = lex(self.source);
        let parser = Parser::new(self.source, tokens)
            .with_exec_fuel(self.exec_fuel)
            .with_recursion_fuel(self.recursion_fuel);

        let ParseResult {
            root,
            diagnostics,
            exec_fuel_consumed,
        } = parser.parse()?;
        self.root = root;
        self.parse_diagnostics = diagnostics;
        self.exec_fuel_consumed = exec_fuel_consumed;
        Ok(())
    }

    fn build(&mut self) {
        let alphabet = self.program.shared_alphabet();
        let mut diag = Diagnostics::new();
        let vars = ExprBuilder::new(alphabet.as_ref(), &mut diag).build(&self.root);
        self.program = Program::new(vars, alphabet);
        self.build_diagnostics = diag;
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn root(&self) -> &Root {
        &self.root
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        self.root.as_cst()
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn exec_fuel_consumed(&self) -> u32 {
        self.exec_fuel_consumed
    }

    /// All diagnostics, parse first.
    pub fn diagnostics(&self) -> Diagnostics {
        let mut all = Diagnostics::new();
        all.extend(self.parse_diagnostics.clone());
        all.extend(self.build_diagnostics.clone());
        all
    }

    /// No error-severity diagnostics (warnings are allowed).
    pub fn is_valid(&self) -> bool {
        !self.parse_diagnostics.has_errors() && !self.build_diagnostics.has_errors()
    }

    /// The built program, or every diagnostic if any of them is an error.
    pub fn into_program(self) -> Result<Program> {
        if !self.is_valid() {
            return Err(Error::CompileError(self.diagnostics()));
        }
        Ok(self.program)
    }

    pub fn to_solomonoff(&self) -> String {
        self.program.to_solomonoff()
    }

    pub fn printer(&self) -> CompilationPrinter<'_, 'a> {
        CompilationPrinter::new(self)
    }
}

impl<'a> TryFrom<&'a str> for Compilation<'a> {
    type Error = crate::Error;

    fn try_from(source: &'a str) -> Result<Self> {
        Self::new(source).exec()
    }
}

impl<'a> TryFrom<&'a String> for Compilation<'a> {
    type Error = crate::Error;

    fn try_from(source: &'a String) -> Result<Self> {
        Self::new(source.as_str()).exec()
    }
}
