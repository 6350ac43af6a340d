//! Token cursor and tree-building state shared by the grammar.
//!
//! Whitespace, newlines and `#` comments never reach the grammar. The cursor
//! parks them in `pending_trivia` and they are flushed into the tree in front
//! of whatever is built next, so trailing trivia of a statement lands in the
//! following node.

use rowan::{Checkpoint, GreenNodeBuilder, TextRange, TextSize};

use super::ast::Root;
use super::cst::{SyntaxKind, SyntaxNode, TokenSet};
use super::lexer::{Token, token_text};
use crate::Error;
use crate::diagnostics::Diagnostics;

#[derive(Debug)]
pub struct ParseResult {
    pub root: Root,
    pub diagnostics: Diagnostics,
    pub exec_fuel_consumed: u32,
}

/// An opening `(`, `[` or `{` waiting for its partner.
#[derive(Debug, Clone, Copy)]
pub(super) struct OpenDelimiter {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

/// Parse budgets. `None` is unlimited.
#[derive(Debug, Clone, Copy, Default)]
struct Fuel {
    exec_limit: Option<u32>,
    exec_left: Option<u32>,
    depth_limit: Option<u32>,
}

impl Fuel {
    /// Pays for one consumed token; `false` once the budget is spent.
    fn burn(&mut self) -> bool {
        match &mut self.exec_left {
            None => true,
            Some(0) => false,
            Some(left) => {
                *left -= 1;
                true
            }
        }
    }

    fn burned(&self) -> u32 {
        match (self.exec_limit, self.exec_left) {
            (Some(limit), Some(left)) => limit - left,
            _ => 0,
        }
    }

    fn allows_depth(&self, depth: u32) -> bool {
        self.depth_limit.is_none_or(|limit| depth < limit)
    }
}

pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    pending_trivia: Vec<Token>,
    builder: GreenNodeBuilder<'static>,
    pub(super) diagnostics: Diagnostics,
    /// Start of the last reported error; one error per position.
    pub(super) last_error_at: Option<TextSize>,
    pub(super) open_delimiters: Vec<OpenDelimiter>,
    depth: u32,
    fuel: Fuel,
    fatal: Option<Error>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            pending_trivia: Vec::new(),
            builder: GreenNodeBuilder::new(),
            diagnostics: Diagnostics::new(),
            last_error_at: None,
            open_delimiters: Vec::new(),
            depth: 0,
            fuel: Fuel::default(),
            fatal: None,
        }
    }

    /// Caps the number of consumed tokens.
    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.fuel.exec_limit = limit;
        self.fuel.exec_left = limit;
        self
    }

    /// Caps group nesting.
    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.fuel.depth_limit = limit;
        self
    }

    pub fn parse(mut self) -> Result<ParseResult, Error> {
        self.parse_root();
        self.flush_trivia();
        if let Some(err) = self.fatal {
            return Err(err);
        }

        let exec_fuel_consumed = self.fuel.burned();
        let green = self.builder.finish();
        let root = Root::cast(SyntaxNode::new_root(green)).expect("parser always produces Root");
        Ok(ParseResult {
            root,
            diagnostics: self.diagnostics,
            exec_fuel_consumed,
        })
    }

    pub(super) fn is_fatal(&self) -> bool {
        self.fatal.is_some()
    }

    fn fail(&mut self, err: Error) {
        self.fatal.get_or_insert(err);
    }

    // Cursor

    fn park_trivia(&mut self) {
        while let Some(&token) = self.tokens.get(self.pos)
            && token.kind.is_trivia()
        {
            self.pending_trivia.push(token);
            self.pos += 1;
        }
    }

    fn current_token(&mut self) -> Option<Token> {
        self.park_trivia();
        self.tokens.get(self.pos).copied()
    }

    /// Kind of the next significant token; `Error` at end of input.
    pub(super) fn current(&mut self) -> SyntaxKind {
        self.current_token().map_or(SyntaxKind::Error, |t| t.kind)
    }

    pub(super) fn current_span(&mut self) -> TextRange {
        match self.current_token() {
            Some(token) => token.span,
            None => TextRange::empty(self.end_offset()),
        }
    }

    pub(super) fn current_text(&mut self) -> &'src str {
        let source = self.source;
        self.current_token().map_or("", |t| token_text(source, &t))
    }

    pub(super) fn at(&mut self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(super) fn at_any(&mut self, set: TokenSet) -> bool {
        set.contains(self.current())
    }

    /// One significant token of lookahead past the current one, enough to
    /// tell `name =` and `Name[` apart from a plain reference.
    pub(super) fn peek_is(&mut self, kind: SyntaxKind) -> bool {
        self.park_trivia();
        self.tokens[self.pos..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(1)
            .is_some_and(|t| t.kind == kind)
    }

    pub(super) fn at_end(&self) -> bool {
        self.tokens[self.pos..].iter().all(|t| t.kind.is_trivia())
    }

    /// End of input, or a fuel limit was hit.
    pub(super) fn halted(&self) -> bool {
        self.at_end() || self.is_fatal()
    }

    pub(super) fn end_offset(&self) -> TextSize {
        TextSize::of(self.source)
    }

    /// End of the last significant token consumed.
    pub(super) fn prev_end(&self) -> Option<TextSize> {
        self.tokens[..self.pos]
            .iter()
            .rfind(|t| !t.kind.is_trivia())
            .map(|t| t.span.end())
    }

    // Tree building

    fn flush_trivia(&mut self) {
        for token in self.pending_trivia.drain(..) {
            let text = token_text(self.source, &token);
            self.builder.token(token.kind.into(), text);
        }
    }

    /// Moves any trivia before the next token into the current node.
    pub(super) fn attach_trivia(&mut self) {
        self.park_trivia();
        self.flush_trivia();
    }

    pub(super) fn start_node(&mut self, kind: SyntaxKind) {
        self.flush_trivia();
        self.builder.start_node(kind.into());
    }

    pub(super) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    /// Marks a point where a node may later be opened around what follows.
    pub(super) fn checkpoint(&mut self) -> Checkpoint {
        self.flush_trivia();
        self.builder.checkpoint()
    }

    /// Opens `kind` at `checkpoint`, adopting everything built since.
    pub(super) fn wrap(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    /// Adds the current token to the tree.
    pub(super) fn bump(&mut self) {
        let Some(token) = self.current_token() else {
            panic!("bump past end of input");
        };
        if !self.fuel.burn() {
            self.fail(Error::ExecFuelExhausted);
        }

        self.flush_trivia();
        self.builder
            .token(token.kind.into(), token_text(self.source, &token));
        self.pos += 1;
    }

    pub(super) fn eat(&mut self, kind: SyntaxKind) -> bool {
        let found = self.at(kind);
        if found {
            self.bump();
        }
        found
    }

    /// Bumps an opening delimiter and remembers where it was.
    pub(super) fn open_delimiter(&mut self, kind: SyntaxKind) {
        self.assert_current(kind);
        let span = self.current_span();
        self.open_delimiters.push(OpenDelimiter { kind, span });
        self.bump();
    }

    // Recursion

    /// Enters a nested group. On `false` the recursion limit is hit and the
    /// parse is aborted.
    pub(super) fn descend(&mut self) -> bool {
        if !self.fuel.allows_depth(self.depth) {
            self.fail(Error::RecursionLimitExceeded);
            return false;
        }
        self.depth += 1;
        true
    }

    pub(super) fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
