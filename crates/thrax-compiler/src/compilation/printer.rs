use std::fmt::Write;

use rowan::NodeOrToken;

use super::Compilation;
use crate::parser::SyntaxNode;

/// Text dumps of a compilation: the syntax tree or the variable table.
pub struct CompilationPrinter<'c, 'src> {
    compilation: &'c Compilation<'src>,
    trivia: bool,
    spans: bool,
    symbols: bool,
}

impl<'c, 'src> CompilationPrinter<'c, 'src> {
    pub fn new(compilation: &'c Compilation<'src>) -> Self {
        Self {
            compilation,
            trivia: false,
            spans: false,
            symbols: false,
        }
    }

    pub fn with_trivia(mut self, value: bool) -> Self {
        self.trivia = value;
        self
    }

    pub fn with_spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    /// Definition names with their reference counts instead of the tree.
    pub fn only_symbols(mut self, value: bool) -> Self {
        self.symbols = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        if self.symbols {
            self.format_symbols(w)
        } else {
            self.format_cst(self.compilation.as_cst(), 0, w)
        }
    }

    fn format_symbols(&self, w: &mut impl Write) -> std::fmt::Result {
        let program = self.compilation.program();
        let usages = program.usages();
        for (name, _) in program.iter() {
            write!(w, "{name}")?;
            match usages.get(name) {
                0 => writeln!(w)?,
                1 => writeln!(w, " (1 use)")?,
                n => writeln!(w, " ({n} uses)")?,
            }
        }
        Ok(())
    }

    fn format_cst(&self, node: &SyntaxNode, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        let span = self.span_str(node.text_range());

        writeln!(w, "{}{:?}{}", prefix, node.kind(), span)?;

        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(n) => self.format_cst(&n, indent + 1, w)?,
                NodeOrToken::Token(t) => {
                    if self.trivia || !t.kind().is_trivia() {
                        let child_prefix = "  ".repeat(indent + 1);
                        let child_span = self.span_str(t.text_range());
                        writeln!(
                            w,
                            "{}{:?}{} {:?}",
                            child_prefix,
                            t.kind(),
                            child_span,
                            t.text()
                        )?;
                    }
                }
            }
        }
        Ok(())
    }

    fn span_str(&self, range: rowan::TextRange) -> String {
        if !self.spans {
            return String::new();
        }
        format!(
            " [{}..{}]",
            u32::from(range.start()),
            u32::from(range.end())
        )
    }
}
