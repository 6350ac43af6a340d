//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::core::Parser;
use super::cst::SyntaxKind;

impl Parser<'_> {
    /// The caller already checked the current token.
    #[inline]
    pub(super) fn assert_current(&mut self, expected: SyntaxKind) {
        let found = self.current();
        assert_eq!(
            found, expected,
            "broken parser invariant: expected {expected:?} at the cursor, found {found:?}",
        );
    }

    #[inline]
    pub(super) fn assert_delimiter_pair(&self, open: SyntaxKind, close: SyntaxKind) {
        let paired = matches!(
            (open, close),
            (SyntaxKind::ParenOpen, SyntaxKind::ParenClose)
                | (SyntaxKind::BracketOpen, SyntaxKind::BracketClose)
                | (SyntaxKind::BraceOpen, SyntaxKind::BraceClose)
        );
        assert!(paired, "broken parser invariant: {open:?} closed by {close:?}");
    }
}
