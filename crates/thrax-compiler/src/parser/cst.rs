//! Syntax kinds for Thrax sources.
//!
//! `SyntaxKind` covers both token kinds (from the lexer) and node kinds (from
//! the parser). Logos derives token recognition; node kinds carry no token
//! attributes. `ThraxLang` implements Rowan's `Language` trait.

use logos::Logos;
use rowan::Language;

/// All token and node kinds. Tokens first, then nodes, then `__LAST`.
/// `#[repr(u16)]` enables the transmute in `kind_from_raw`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen = 0,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    /// Opens a weight: `<1.5>`
    #[token("<")]
    AngleOpen,

    #[token(">")]
    AngleClose,

    #[token("=")]
    Equals,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    /// Output annotation `input : output`
    #[token(":")]
    Colon,

    #[token("|")]
    Pipe,

    /// Composition
    #[token("@")]
    At,

    /// Difference
    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("+")]
    Plus,

    #[token("?")]
    Question,

    #[regex(r#""(?:[^"\\]|\\.)*""#)]
    #[regex(r"'(?:[^'\\]|\\.)*'")]
    #[doc(hidden)]
    StringLiteral, // Lexer-internal only

    DoubleQuote,
    SingleQuote,
    /// String content between quotes, escapes not yet resolved
    StrVal,

    /// Opening quote with no partner; runs to the end of input.
    #[regex(r#""(?:[^"\\]|\\.)*"#, allow_greedy = true)]
    #[regex(r"'(?:[^'\\]|\\.)*", allow_greedy = true)]
    UnterminatedStr,

    #[token("import")]
    KwImport,

    #[token("as")]
    KwAs,

    #[token("func")]
    KwFunc,

    #[token("return")]
    KwReturn,

    #[token("export")]
    KwExport,

    #[regex(r"[0-9]+(?:\.[0-9]+)?")]
    Number,

    /// Identifier. Dots allow qualified names like `bytelib.kDigit`.
    /// Defined after keywords so they take precedence.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_.]*")]
    Id,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[token("\n")]
    #[token("\r\n")]
    Newline,

    #[regex(r"#[^\n]*", allow_greedy = true)]
    LineComment,

    /// Coalesced unrecognized characters
    Garbage,
    Error,

    // --- Node kinds (non-terminals) ---
    Root,
    VarDef,
    Import,
    FuncDef,
    Params,
    Return,
    Compose,
    Union,
    Diff,
    Concat,
    Output,
    Weight,
    Repeat,
    Closure,
    Ref,
    Str,
    Nested,
    Call,
    Args,

    // Must be last - used for bounds checking in `kind_from_raw`
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | Newline | LineComment)
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Error | Garbage | UnterminatedStr)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language tag for Rowan's tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThraxLang {}

impl Language for ThraxLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 < __LAST as u16);
        // SAFETY: bounds checked above, and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<ThraxLang>;
pub type SyntaxToken = rowan::SyntaxToken<ThraxLang>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

/// 64-bit bitset of `SyntaxKind`s for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Panics at compile time if any kind's discriminant >= 64.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 64, "SyntaxKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn single(kind: SyntaxKind) -> Self {
        let kind = kind as u16;
        assert!(kind < 64, "SyntaxKind value exceeds TokenSet capacity");
        TokenSet(1 << kind)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= 64 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for i in 0..64u16 {
            if self.0 & (1 << i) != 0 && i < __LAST as u16 {
                // SAFETY: i < __LAST, and SyntaxKind is repr(u16)
                let kind: SyntaxKind = unsafe { std::mem::transmute(i) };
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    /// Tokens that can start an expression.
    pub const EXPR_FIRST: TokenSet =
        TokenSet::new(&[Id, DoubleQuote, SingleQuote, UnterminatedStr, ParenOpen]);

    pub const CLOSURES: TokenSet = TokenSet::new(&[Star, Plus, Question]);

    /// Tokens that end a broken statement (besides `name =`).
    pub const STMT_BOUNDARY: TokenSet =
        TokenSet::new(&[Semicolon, BraceClose, KwExport, KwImport, KwFunc, KwReturn]);
}
