//! Lexer for Thrax sources.
//!
//! Tokens are spans into the source; text is sliced only when the tree is
//! built. Two post-processing steps run over the logos output:
//!
//! - a run of characters logos cannot match becomes one `Garbage` token
//! - a quoted literal is split into quote, raw content and quote, so the
//!   tree keeps the content as its own `StrVal` token
//!
//! A quote with no partner is an `UnterminatedStr` token covering the rest of
//! the input.

use std::ops::Range;

use logos::Logos;
use rowan::{TextRange, TextSize};

use super::cst::SyntaxKind;

/// Kind plus span; no text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: SyntaxKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

/// Tokenizes `source`. The spans of the result tile the source exactly.
pub fn lex(source: &str) -> Vec<Token> {
    let mut out = TokenSink {
        source,
        tokens: Vec::new(),
        garbage_from: None,
    };
    let mut lexer = SyntaxKind::lexer(source);
    while let Some(result) = lexer.next() {
        match result {
            Ok(kind) => out.push(kind, lexer.span()),
            Err(()) => out.garbage(lexer.span()),
        }
    }
    out.finish()
}

/// Text slice for a token. O(1).
#[inline]
pub fn token_text<'src>(source: &'src str, token: &Token) -> &'src str {
    &source[Range::<usize>::from(token.span)]
}

struct TokenSink<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    /// Start of the unrecognized run in progress.
    garbage_from: Option<usize>,
}

impl TokenSink<'_> {
    fn push(&mut self, kind: SyntaxKind, span: Range<usize>) {
        self.end_garbage(span.start);
        match kind {
            SyntaxKind::StringLiteral => self.push_string(span),
            _ => self.emit(kind, span),
        }
    }

    fn garbage(&mut self, span: Range<usize>) {
        self.garbage_from.get_or_insert(span.start);
    }

    fn finish(mut self) -> Vec<Token> {
        self.end_garbage(self.source.len());
        self.tokens
    }

    fn end_garbage(&mut self, at: usize) {
        if let Some(from) = self.garbage_from.take() {
            self.emit(SyntaxKind::Garbage, from..at);
        }
    }

    /// Both quotes are one byte wide; an empty literal has no `StrVal`.
    fn push_string(&mut self, span: Range<usize>) {
        let quote = match self.source.as_bytes()[span.start] {
            b'"' => SyntaxKind::DoubleQuote,
            _ => SyntaxKind::SingleQuote,
        };
        let content = span.start + 1..span.end - 1;

        self.emit(quote, span.start..content.start);
        if !content.is_empty() {
            self.emit(SyntaxKind::StrVal, content.clone());
        }
        self.emit(quote, content.end..span.end);
    }

    fn emit(&mut self, kind: SyntaxKind, span: Range<usize>) {
        let span = TextRange::new(offset(span.start), offset(span.end));
        self.tokens.push(Token::new(kind, span));
    }
}

fn offset(at: usize) -> TextSize {
    TextSize::new(at as u32)
}
