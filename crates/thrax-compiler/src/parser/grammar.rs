//! Grammar productions for Thrax sources.
//!
//! All `parse_*` methods extend `Parser`. Binary levels from loosest to
//! tightest: composition `@`, union `|`, difference `-`, concatenation
//! (juxtaposition), output `:`, weight `<w>`, repetition `{n,m}`, closure
//! `* + ?`. Each binary level collects all of its operators into one n-ary
//! node opened at a checkpoint, so long chains stay flat; the builder folds
//! them left to right.

use rowan::Checkpoint;

use super::core::Parser;
use super::cst::SyntaxKind;
use super::cst::token_sets::{CLOSURES, EXPR_FIRST, STMT_BOUNDARY};
use crate::diagnostics::DiagnosticKind;

impl Parser<'_> {
    pub fn parse_root(&mut self) {
        self.start_node(SyntaxKind::Root);

        loop {
            if self.is_fatal() {
                break;
            }
            let kind = self.current();
            if self.at_end() {
                break;
            }
            if kind == SyntaxKind::BraceClose {
                self.recover_stmt("`}` without an open function body");
                continue;
            }
            self.parse_stmt();
        }

        self.attach_trivia();
        self.finish_node();
    }

    fn parse_stmt(&mut self) {
        match self.current() {
            SyntaxKind::Id | SyntaxKind::KwExport => self.parse_var_def(),
            SyntaxKind::KwImport => self.parse_import(),
            SyntaxKind::KwFunc => self.parse_func_def(),
            SyntaxKind::KwReturn => self.parse_return(),
            _ => self.recover_stmt("expected a statement like `name = ...;`"),
        }
    }

    /// `[export] name = fst ;`
    fn parse_var_def(&mut self) {
        self.start_node(SyntaxKind::VarDef);

        self.eat(SyntaxKind::KwExport);
        self.expect(SyntaxKind::Id, DiagnosticKind::ExpectedName, "for definition");
        self.expect(
            SyntaxKind::Equals,
            DiagnosticKind::UnexpectedToken,
            "expected `=` after name",
        );

        let recovered = self.parse_body_fst("after `=`");
        self.finish_stmt(recovered, "after definition");

        self.finish_node();
    }

    /// `import 'path' as alias ;`
    fn parse_import(&mut self) {
        self.start_node(SyntaxKind::Import);
        self.assert_current(SyntaxKind::KwImport);
        self.bump();

        match self.current() {
            SyntaxKind::DoubleQuote | SyntaxKind::SingleQuote => self.parse_str(),
            SyntaxKind::UnterminatedStr => self.error_unterminated_string(),
            _ => self.error(DiagnosticKind::UnexpectedToken, "expected a quoted path"),
        }
        self.expect(SyntaxKind::KwAs, DiagnosticKind::UnexpectedToken, "expected `as`");
        self.expect(SyntaxKind::Id, DiagnosticKind::ExpectedName, "for import alias");
        self.expect_semicolon("after import");

        self.finish_node();
    }

    /// `func Name[a, b] { stmt* return fst; }`
    fn parse_func_def(&mut self) {
        self.start_node(SyntaxKind::FuncDef);
        self.assert_current(SyntaxKind::KwFunc);
        self.bump();

        self.expect(SyntaxKind::Id, DiagnosticKind::ExpectedName, "for function");
        self.parse_params();

        if self.at(SyntaxKind::BraceOpen) {
            self.open_delimiter(SyntaxKind::BraceOpen);
            loop {
                if self.is_fatal() {
                    break;
                }
                let kind = self.current();
                if self.at_end() || kind == SyntaxKind::BraceClose {
                    break;
                }
                self.parse_stmt();
            }
            self.close_delimiter(SyntaxKind::BraceClose, "function body");
        } else {
            self.error(
                DiagnosticKind::UnexpectedToken,
                "expected `{` to open function body",
            );
        }

        self.finish_node();
    }

    fn parse_params(&mut self) {
        self.start_node(SyntaxKind::Params);

        if self.at(SyntaxKind::BracketOpen) {
            self.open_delimiter(SyntaxKind::BracketOpen);
            if !self.at(SyntaxKind::BracketClose) {
                loop {
                    self.expect(SyntaxKind::Id, DiagnosticKind::ExpectedName, "for parameter");
                    if !self.eat(SyntaxKind::Comma) {
                        break;
                    }
                }
            }
            self.close_delimiter(SyntaxKind::BracketClose, "parameter list");
        } else {
            self.error(
                DiagnosticKind::UnexpectedToken,
                "expected `[` to open parameter list",
            );
        }

        self.finish_node();
    }

    /// `return fst ;`
    fn parse_return(&mut self) {
        self.start_node(SyntaxKind::Return);
        self.assert_current(SyntaxKind::KwReturn);
        self.bump();

        let recovered = self.parse_body_fst("after `return`");
        self.finish_stmt(recovered, "after return");

        self.finish_node();
    }

    /// Statement body. Returns `true` if stray tokens had to be skipped.
    fn parse_body_fst(&mut self, after: &str) -> bool {
        if self.at_any(EXPR_FIRST) {
            self.parse_fst();
            return false;
        }
        if self.at_end() || self.at_stmt_boundary() {
            self.error(DiagnosticKind::ExpectedExpression, after);
            return false;
        }
        self.skip_to_stmt_boundary(DiagnosticKind::ExpectedExpression, after);
        true
    }

    fn finish_stmt(&mut self, recovered: bool, after: &str) {
        let at_end = self.at_end() || self.at_stmt_boundary();
        if !recovered && !at_end {
            self.skip_to_stmt_boundary(
                DiagnosticKind::UnexpectedToken,
                "expected `;` to end the statement",
            );
            self.eat(SyntaxKind::Semicolon);
            return;
        }
        if recovered {
            self.eat(SyntaxKind::Semicolon);
            return;
        }
        self.expect_semicolon(after);
    }

    fn at_stmt_boundary(&mut self) -> bool {
        match self.current() {
            SyntaxKind::Id => self.peek_is(SyntaxKind::Equals),
            kind => STMT_BOUNDARY.contains(kind),
        }
    }

    /// Wraps tokens up to the next statement boundary in an `Error` node.
    fn skip_to_stmt_boundary(&mut self, kind: DiagnosticKind, message: &str) {
        self.start_node(SyntaxKind::Error);
        self.error(kind, message);
        while !self.halted() && !self.at_stmt_boundary() {
            self.bump();
        }
        self.finish_node();
    }

    /// Top-level garbage: consume at least one token, then skip to the next
    /// statement, swallowing its `;`.
    fn recover_stmt(&mut self, message: &str) {
        self.start_node(SyntaxKind::Error);
        self.error(DiagnosticKind::UnexpectedToken, message);
        self.bump();
        while !self.halted() && !self.at_stmt_boundary() {
            self.bump();
        }
        self.eat(SyntaxKind::Semicolon);
        self.finish_node();
    }

    /// Composition, the loosest level.
    fn parse_fst(&mut self) {
        if !self.descend() {
            self.start_node(SyntaxKind::Error);
            while !self.halted() {
                self.bump();
            }
            self.finish_node();
            return;
        }

        self.parse_chain(SyntaxKind::Compose, SyntaxKind::At, "@", Self::parse_union);

        self.ascend();
    }

    fn parse_union(&mut self) {
        self.parse_chain(SyntaxKind::Union, SyntaxKind::Pipe, "|", Self::parse_diff);
    }

    fn parse_diff(&mut self) {
        self.parse_chain(SyntaxKind::Diff, SyntaxKind::Minus, "-", Self::parse_concat);
    }

    /// `operand (op operand)*` as one node. A lone operand stays unwrapped.
    fn parse_chain(
        &mut self,
        node: SyntaxKind,
        op: SyntaxKind,
        op_text: &str,
        operand: fn(&mut Self),
    ) {
        let checkpoint = self.checkpoint();
        operand(self);
        if !self.at(op) {
            return;
        }

        self.wrap(checkpoint, node);
        while self.at(op) {
            self.bump();
            self.parse_operand(operand, op_text);
        }
        self.finish_node();
    }

    fn parse_operand(&mut self, operand: fn(&mut Self), after: &str) {
        if self.at_any(EXPR_FIRST) {
            operand(self);
        } else {
            self.error(DiagnosticKind::ExpectedExpression, format!("after `{after}`"));
        }
    }

    /// Juxtaposition. `name =` ahead means the `;` is missing, not another operand.
    fn parse_concat(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_output();
        if !self.at_concat_operand() {
            return;
        }

        self.wrap(checkpoint, SyntaxKind::Concat);
        while self.at_concat_operand() {
            self.parse_output();
        }
        self.finish_node();
    }

    fn at_concat_operand(&mut self) -> bool {
        if !self.at_any(EXPR_FIRST) {
            return false;
        }
        !(self.at(SyntaxKind::Id) && self.peek_is(SyntaxKind::Equals))
    }

    /// `input : output`
    fn parse_output(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_weight();
        if self.at(SyntaxKind::Colon) {
            self.wrap(checkpoint, SyntaxKind::Output);
            self.bump();
            self.parse_operand(Self::parse_weight, ":");
            self.finish_node();
        }
    }

    /// `expr <weight>`
    fn parse_weight(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_repeat();
        if self.at(SyntaxKind::AngleOpen) {
            self.wrap(checkpoint, SyntaxKind::Weight);
            self.bump();
            self.expect(SyntaxKind::Number, DiagnosticKind::ExpectedNumber, "inside `< >`");
            self.expect(
                SyntaxKind::AngleClose,
                DiagnosticKind::UnexpectedToken,
                "expected `>` to close weight",
            );
            self.finish_node();
        }
    }

    /// `expr{n}` | `expr{from,to}`
    fn parse_repeat(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_closure();
        if !self.at(SyntaxKind::BraceOpen) {
            return;
        }

        self.wrap(checkpoint, SyntaxKind::Repeat);
        self.open_delimiter(SyntaxKind::BraceOpen);
        self.parse_repeat_bound();
        if self.eat(SyntaxKind::Comma) {
            self.parse_repeat_bound();
        }
        self.close_delimiter(SyntaxKind::BraceClose, "repetition");
        self.finish_node();
    }

    fn parse_repeat_bound(&mut self) {
        if !self.at(SyntaxKind::Number) {
            self.error(DiagnosticKind::ExpectedNumber, "as repetition bound");
            return;
        }
        let text = self.current_text();
        if text.parse::<u32>().is_err() {
            self.error(DiagnosticKind::InvalidRepetitionBound, format!("`{text}`"));
        }
        self.bump();
    }

    fn parse_closure(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_atom();
        self.try_parse_closure(checkpoint);
    }

    fn try_parse_closure(&mut self, checkpoint: Checkpoint) {
        if self.at_any(CLOSURES) {
            self.wrap(checkpoint, SyntaxKind::Closure);
            self.bump();
            self.finish_node();
        }
    }

    fn parse_atom(&mut self) {
        match self.current() {
            SyntaxKind::Id if self.peek_is(SyntaxKind::BracketOpen) => self.parse_call(),
            SyntaxKind::Id => {
                self.start_node(SyntaxKind::Ref);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::DoubleQuote | SyntaxKind::SingleQuote => self.parse_str(),
            SyntaxKind::UnterminatedStr => self.error_unterminated_string(),
            SyntaxKind::ParenOpen => self.parse_nested(),
            _ => {
                self.error_and_bump(DiagnosticKind::UnexpectedToken, "not a valid expression");
            }
        }
    }

    /// `( fst )`
    fn parse_nested(&mut self) {
        self.start_node(SyntaxKind::Nested);
        self.open_delimiter(SyntaxKind::ParenOpen);

        self.parse_operand(Self::parse_fst, "(");

        self.close_delimiter(SyntaxKind::ParenClose, "group");
        self.finish_node();
    }

    /// `Name[arg, ...]`
    fn parse_call(&mut self) {
        self.start_node(SyntaxKind::Call);
        self.bump();

        self.start_node(SyntaxKind::Args);
        self.open_delimiter(SyntaxKind::BracketOpen);
        if !self.at(SyntaxKind::BracketClose) {
            let mut after = "[";
            loop {
                self.parse_operand(Self::parse_fst, after);
                if !self.eat(SyntaxKind::Comma) {
                    break;
                }
                after = ",";
            }
        }
        self.close_delimiter(SyntaxKind::BracketClose, "argument list");
        self.finish_node();

        self.finish_node();
    }

    fn parse_str(&mut self) {
        self.start_node(SyntaxKind::Str);
        self.bump_string_tokens();
        self.finish_node();
    }

    /// Quote + optional content + quote. The lexer only emits quotes in
    /// complete pairs.
    fn bump_string_tokens(&mut self) {
        let open_quote = self.current();
        self.bump();

        if self.at(SyntaxKind::StrVal) {
            self.bump();
        }

        self.assert_current(open_quote);
        self.bump();
    }
}
