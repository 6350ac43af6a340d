//! Error reporting for the grammar.
//!
//! At most one error is reported per source position. An error raised
//! inside an open delimiter suppresses cascades up to the end of input,
//! since the unclosed delimiter is usually the real problem.

use rowan::{TextRange, TextSize};

use super::core::Parser;
use super::cst::SyntaxKind;
use crate::diagnostics::DiagnosticKind;

impl Parser<'_> {
    /// Claims `at` for an error; `false` if something was reported there.
    fn claim(&mut self, at: TextSize) -> bool {
        let fresh = self.last_error_at != Some(at);
        self.last_error_at = Some(at);
        fresh
    }

    fn cascade_range(&mut self) -> TextRange {
        match self.open_delimiters.last() {
            Some(open) => TextRange::new(open.span.start(), self.end_offset()),
            None => self.current_span(),
        }
    }

    /// Reports at the current token without consuming it.
    pub(super) fn error(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let range = self.current_span();
        if !self.claim(range.start()) {
            return;
        }
        let cascade = self.cascade_range();
        self.diagnostics
            .report(kind, range)
            .message(message)
            .suppression_range(cascade)
            .emit();
    }

    /// Reports at the current token and wraps it in an `Error` node.
    pub(super) fn error_and_bump(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.error(kind, message);
        if !self.at_end() {
            self.start_node(SyntaxKind::Error);
            self.bump();
            self.finish_node();
        }
    }

    /// Consumes `kind`, or reports `message` and leaves the token alone.
    pub(super) fn expect(
        &mut self,
        kind: SyntaxKind,
        diagnostic: DiagnosticKind,
        message: &str,
    ) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.error(diagnostic, message);
        false
    }

    /// A missing `;` is reported right after the previous token, with a fix
    /// that inserts it.
    pub(super) fn expect_semicolon(&mut self, after: &str) -> bool {
        if self.eat(SyntaxKind::Semicolon) {
            return true;
        }
        let at = match self.prev_end() {
            Some(end) => end,
            None => self.current_span().start(),
        };
        if !self.claim(at) {
            return false;
        }
        self.diagnostics
            .report(DiagnosticKind::ExpectedSemicolon, TextRange::empty(at))
            .message(after)
            .fix("add `;`", ";")
            .emit();
        false
    }

    /// Consumes the partner of the innermost open delimiter. If it is
    /// missing, the error spans from the opening token to the current one.
    pub(super) fn close_delimiter(&mut self, close: SyntaxKind, construct: &str) {
        let open = self.open_delimiters.pop();
        if let Some(open) = open {
            self.assert_delimiter_pair(open.kind, close);
        }
        if self.eat(close) {
            return;
        }
        let Some(open) = open else {
            return;
        };

        let current = self.current_span();
        if !self.claim(current.start()) {
            return;
        }
        let (kind, token) = match close {
            SyntaxKind::ParenClose => (DiagnosticKind::UnclosedParen, "`)`"),
            SyntaxKind::BracketClose => (DiagnosticKind::UnclosedBracket, "`]`"),
            _ => (DiagnosticKind::UnclosedBrace, "`}`"),
        };
        self.diagnostics
            .report(kind, TextRange::new(open.span.start(), current.end()))
            .message(format!("expected {token}"))
            .related_to(format!("{construct} started here"), open.span)
            .emit();
    }

    /// A string without its closing quote runs to the end of input, so
    /// everything after it is noise.
    pub(super) fn error_unterminated_string(&mut self) {
        let range = self.current_span();
        let text = self.current_text();
        let quote = if text.starts_with('"') { "\"" } else { "'" };
        let closed = format!("{text}{quote}");
        if self.claim(range.start()) {
            let end_offset = self.end_offset();
            self.diagnostics
                .report(DiagnosticKind::UnterminatedString, range)
                .fix(format!("close with {quote}"), closed)
                .suppression_range(TextRange::new(range.start(), end_offset))
                .emit();
        }
        self.start_node(SyntaxKind::Error);
        self.bump();
        self.finish_node();
    }
}
