#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core value types shared by the Thrax front end.
//!
//! - [`IntSeq`]: immutable, view-based codepoint sequence used for literals,
//!   comparisons and escaped rendering.
//! - [`printable`]: the printable-codepoint test and the quoting/escaping rules
//!   of the canonical textual output.
//! - [`ranges`]: character classes as canonical breakpoint lists over a bounded
//!   [`Alphabet`].

mod int_seq;
mod invariants;
pub mod printable;
pub mod ranges;


pub use int_seq::IntSeq;
pub use printable::MAX_CODEPOINT;
pub use ranges::{Alphabet, Breakpoint, Ranges, Run, UnicodeAlphabet};
