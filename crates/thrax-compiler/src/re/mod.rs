//! Regular-expression node model.
//!
//! Nodes are immutable values shared through `Rc`. Literal and class leaves
//! can be aliased freely; anything bigger is shared by name through
//! [`Re::Var`].

pub mod literal;

#[cfg(test)]
mod re_tests;

use std::rc::Rc;

use indexmap::IndexMap;
use serde::Serialize;
use thrax_core::{Alphabet, IntSeq, Ranges};

pub use literal::{LiteralError, LiteralErrorKind, parse_literal};

/// Stands in for an output side that is not a literal.
pub const NONDETERMINISM_ERROR: &str = "NONDETERMINISM_ERROR";
/// Stands in for a weighted expression.
pub const WEIGHT_NOT_SUPPORTED: &str = "WEIGHT_NOT_SUPPORTED";
/// Stands in for a function call.
pub const FUNCTION_NOT_SUPPORTED: &str = "FUNCTION_NOT_SUPPORTED";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantifier {
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
    /// `?`
    ZeroOrOne,
}

impl Quantifier {
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "*" => Some(Self::ZeroOrMore),
            "+" => Some(Self::OneOrMore),
            "?" => Some(Self::ZeroOrOne),
            _ => None,
        }
    }

    pub fn marker(self) -> char {
        match self {
            Self::ZeroOrMore => '*',
            Self::OneOrMore => '+',
            Self::ZeroOrOne => '?',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Re {
    Union { lhs: Rc<Re>, rhs: Rc<Re> },
    Concat { lhs: Rc<Re>, rhs: Rc<Re> },
    Compose { lhs: Rc<Re>, rhs: Rc<Re> },
    Diff { lhs: Rc<Re>, rhs: Rc<Re> },
    Kleene { operand: Rc<Re>, quantifier: Quantifier },
    Output { input: Rc<Re>, output: IntSeq },
    Char { codepoint: u32 },
    Set { ranges: Ranges },
    Str { seq: IntSeq },
    Var { name: String },
}

impl Re {
    /// A one-codepoint literal becomes [`Re::Char`].
    pub fn literal(seq: IntSeq) -> Re {
        if seq.len() == 1 {
            Re::Char { codepoint: seq.at(0) }
        } else {
            Re::Str { seq }
        }
    }

    pub fn epsilon() -> Re {
        Re::Str {
            seq: IntSeq::epsilon(),
        }
    }

    pub fn var(name: impl Into<String>) -> Re {
        Re::Var { name: name.into() }
    }

    pub fn union(lhs: Rc<Re>, rhs: Rc<Re>) -> Re {
        Re::Union { lhs, rhs }
    }

    pub fn concat(lhs: Rc<Re>, rhs: Rc<Re>) -> Re {
        Re::Concat { lhs, rhs }
    }

    pub fn compose(lhs: Rc<Re>, rhs: Rc<Re>) -> Re {
        Re::Compose { lhs, rhs }
    }

    pub fn diff(lhs: Rc<Re>, rhs: Rc<Re>) -> Re {
        Re::Diff { lhs, rhs }
    }

    pub fn kleene(operand: Rc<Re>, quantifier: Quantifier) -> Re {
        Re::Kleene {
            operand,
            quantifier,
        }
    }

    /// Binding strength for parenthesization; lower binds tighter.
    ///
    /// A class with several runs prints as a `|`-joined list and so ranks
    /// with unions.
    pub fn precedence(&self) -> u8 {
        match self {
            Re::Union { .. } => 4,
            Re::Concat { .. } => 3,
            Re::Kleene { .. } => 2,
            Re::Output { .. } => 1,
            Re::Set { ranges } if ranges.member_run_count() > 1 => 4,
            _ => 0,
        }
    }

    pub fn is_set_like(&self) -> bool {
        matches!(self, Re::Set { .. } | Re::Char { .. })
    }

    pub fn is_str_like(&self) -> bool {
        matches!(self, Re::Str { .. } | Re::Char { .. })
    }

    /// Class view. A `Char` outside the alphabet has none.
    pub fn as_set(&self, alphabet: &dyn Alphabet) -> Option<Ranges> {
        match self {
            Re::Set { ranges } => Some(ranges.clone()),
            Re::Char { codepoint }
                if (alphabet.minimal()..=alphabet.maximal()).contains(codepoint) =>
            {
                Some(Ranges::singleton(alphabet, *codepoint))
            }
            _ => None,
        }
    }

    /// Literal view.
    pub fn as_str(&self) -> Option<IntSeq> {
        match self {
            Re::Str { seq } => Some(seq.clone()),
            Re::Char { codepoint } => Some(IntSeq::from(vec![*codepoint])),
            _ => None,
        }
    }

    /// Adds one to `counts[name]` for every variable reference below `self`,
    /// in left-to-right order.
    pub fn count_usages(&self, counts: &mut IndexMap<String, usize>) {
        let mut pending = vec![self];
        while let Some(re) = pending.pop() {
            if let Re::Var { name } = re {
                *counts.entry(name.clone()).or_insert(0) += 1;
            }
            pending.extend(re.children().rev().map(Rc::as_ref));
        }
    }

    /// Direct subexpressions, left to right.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = &Rc<Re>> {
        match self {
            Re::Union { lhs, rhs }
            | Re::Concat { lhs, rhs }
            | Re::Compose { lhs, rhs }
            | Re::Diff { lhs, rhs } => [Some(lhs), Some(rhs)],
            Re::Kleene { operand, .. } => [Some(operand), None],
            Re::Output { input, .. } => [Some(input), None],
            Re::Char { .. } | Re::Set { .. } | Re::Str { .. } | Re::Var { .. } => [None, None],
        }
        .into_iter()
        .flatten()
    }

    /// Moves uniquely owned inner children to `out`, leaving leaves in
    /// their place.
    fn detach_children(&mut self, out: &mut Vec<Rc<Re>>) {
        let slots = match self {
            Re::Union { lhs, rhs }
            | Re::Concat { lhs, rhs }
            | Re::Compose { lhs, rhs }
            | Re::Diff { lhs, rhs } => [Some(lhs), Some(rhs)],
            Re::Kleene { operand, .. } => [Some(operand), None],
            Re::Output { input, .. } => [Some(input), None],
            Re::Char { .. } | Re::Set { .. } | Re::Str { .. } | Re::Var { .. } => [None, None],
        };
        for slot in slots.into_iter().flatten() {
            if Rc::strong_count(slot) == 1 && slot.children().next().is_some() {
                out.push(std::mem::replace(slot, Rc::new(Re::Char { codepoint: 0 })));
            }
        }
    }
}

/// Spines from long inputs are deeper than the call stack, so nested nodes
/// are released from a work list instead of recursively.
impl Drop for Re {
    fn drop(&mut self) {
        let mut detached = Vec::new();
        self.detach_children(&mut detached);
        while let Some(child) = detached.pop() {
            if let Some(mut re) = Rc::into_inner(child) {
                re.detach_children(&mut detached);
            }
        }
    }
}
