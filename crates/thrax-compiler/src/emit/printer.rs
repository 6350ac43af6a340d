use std::fmt::{self, Write};

use indexmap::IndexMap;
use thrax_core::Alphabet;
use thrax_core::printable::{write_literal, write_range};

use super::{SHARED_MARKER, UsageCounts};
use crate::re::Re;

/// Pending output of [`SerializationContext::write_re`].
enum Piece<'r> {
    /// A subexpression, parenthesized when it binds looser than `parent`.
    Node { re: &'r Re, parent: Option<u8> },
    Char(char),
    /// Output side of `input:output`.
    Literal(&'r [u32]),
}

impl<'r> Piece<'r> {
    fn node(re: &'r Re, parent: Option<u8>) -> Self {
        Piece::Node { re, parent }
    }
}

/// Schedules `lhs sep rhs`.
fn infix<'r>(work: &mut Vec<Piece<'r>>, lhs: &'r Re, sep: char, rhs: &'r Re, parent: Option<u8>) {
    work.push(Piece::node(rhs, parent));
    work.push(Piece::Char(sep));
    work.push(Piece::node(lhs, parent));
}

/// State of one serialization pass.
///
/// Owns its copy of the usage counts, so several passes over the same
/// program print identical text.
pub struct SerializationContext<'a> {
    alphabet: &'a dyn Alphabet,
    remaining: IndexMap<String, usize>,
}

impl<'a> SerializationContext<'a> {
    pub fn new(alphabet: &'a dyn Alphabet, counts: &UsageCounts) -> Self {
        Self {
            alphabet,
            remaining: counts.as_map().clone(),
        }
    }

    /// `name = expr` and a newline.
    pub fn write_definition(&mut self, w: &mut impl Write, name: &str, re: &Re) -> fmt::Result {
        write!(w, "{name} = ")?;
        self.write_re(w, re)?;
        w.write_char('\n')
    }

    /// Walks `re` with an explicit work list; spines built from long inputs
    /// are deeper than the call stack allows.
    pub fn write_re(&mut self, w: &mut impl Write, re: &Re) -> fmt::Result {
        let mut work = vec![Piece::node(re, None)];
        while let Some(piece) = work.pop() {
            match piece {
                Piece::Node { re, parent } => self.write_node(w, re, parent, &mut work)?,
                Piece::Char(c) => w.write_char(c)?,
                Piece::Literal(output) => write_literal(w, output)?,
            }
        }
        Ok(())
    }

    /// Writes what comes before the first child of `re` and schedules the
    /// rest. Pieces are pushed in reverse.
    fn write_node<'r>(
        &mut self,
        w: &mut impl Write,
        re: &'r Re,
        parent: Option<u8>,
        work: &mut Vec<Piece<'r>>,
    ) -> fmt::Result {
        let level = re.precedence();
        if parent.is_some_and(|parent| level > parent) {
            w.write_char('(')?;
            work.push(Piece::Char(')'));
            work.push(Piece::node(re, None));
            return Ok(());
        }

        let nested = Some(level);
        match re {
            Re::Union { lhs, rhs } => infix(work, lhs, '|', rhs, nested),
            Re::Concat { lhs, rhs } => infix(work, lhs, ' ', rhs, nested),
            // The brackets delimit the operands.
            Re::Compose { lhs, rhs } => {
                w.write_str("compose[")?;
                work.push(Piece::Char(']'));
                infix(work, lhs, ',', rhs, None);
            }
            Re::Diff { lhs, rhs } => {
                w.write_str("subtract[")?;
                work.push(Piece::Char(']'));
                infix(work, lhs, ',', rhs, None);
            }
            Re::Kleene {
                operand,
                quantifier,
            } => {
                work.push(Piece::Char(quantifier.marker()));
                work.push(Piece::node(operand, nested));
            }
            Re::Output { input, output } => {
                work.push(Piece::Literal(output.as_slice()));
                work.push(Piece::Char(':'));
                work.push(Piece::node(input, nested));
            }
            Re::Char { codepoint } => write_literal(w, &[*codepoint])?,
            Re::Set { ranges } => {
                for (i, run) in ranges.member_runs(self.alphabet).enumerate() {
                    if i > 0 {
                        w.write_char('|')?;
                    }
                    write_range(w, run.from, run.to)?;
                }
            }
            Re::Str { seq } => write!(w, "{seq}")?,
            Re::Var { name } => {
                if self.take_reference(name) {
                    w.write_str(SHARED_MARKER)?;
                }
                w.write_str(name)?;
            }
        }
        Ok(())
    }

    /// Consumes one use of `name`; `true` while later uses remain.
    fn take_reference(&mut self, name: &str) -> bool {
        match self.remaining.get_mut(name) {
            Some(count) => {
                *count = count.saturating_sub(1);
                *count > 0
            }
            None => false,
        }
    }
}
