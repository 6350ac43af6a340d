//! Character classes as sorted breakpoint lists.
//!
//! A breakpoint list over an alphabet `[minimal, maximal]` is a sorted
//! sequence of `(point, member)` pairs. Entry `i` gives the membership of
//! every codepoint from the successor of entry `i - 1` (or `minimal` for the
//! first entry) up to and including `point`. The last entry is always at
//! `maximal`. In canonical form no two adjacent entries share a flag.
//!
//! ```text
//! ['b'-'d']  =>  [(97, false), (100, true), (0x10FFFF, false)]
//! ```

use serde::{Deserialize, Serialize};

use crate::invariants::{assert_ends_at_maximal, assert_interval_in_alphabet};
use crate::printable::MAX_CODEPOINT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Breakpoint {
    pub point: u32,
    pub member: bool,
}

impl Breakpoint {
    pub const fn new(point: u32, member: bool) -> Self {
        Self { point, member }
    }
}

/// Ordered, bounded codepoint domain.
///
/// Used by the expression builder to fold character classes and by the
/// downstream automaton builder to construct transitions.
pub trait Alphabet {
    fn minimal(&self) -> u32;
    fn maximal(&self) -> u32;

    fn successor(&self, codepoint: u32) -> u32 {
        codepoint + 1
    }

    fn predecessor(&self, codepoint: u32) -> u32 {
        codepoint - 1
    }

    fn empty_ranges(&self) -> Vec<Breakpoint> {
        vec![Breakpoint::new(self.maximal(), false)]
    }

    fn singleton_ranges(&self, codepoint: u32) -> Vec<Breakpoint> {
        self.interval_ranges(codepoint, codepoint)
    }

    /// Inclusive interval `from..=to`.
    fn interval_ranges(&self, from: u32, to: u32) -> Vec<Breakpoint> {
        let (minimal, maximal) = (self.minimal(), self.maximal());
        assert_interval_in_alphabet(from, to, minimal, maximal);

        let mut points = Vec::with_capacity(3);
        if from > minimal {
            points.push(Breakpoint::new(self.predecessor(from), false));
        }
        points.push(Breakpoint::new(to, true));
        if to < maximal {
            points.push(Breakpoint::new(maximal, false));
        }
        points
    }

    /// Sorted merge of two breakpoint lists.
    ///
    /// Every distinct point of either side becomes a boundary whose flag is
    /// `combinator(lhs_flag, rhs_flag)`. The result is not canonical.
    fn zip_ranges(
        &self,
        lhs: &[Breakpoint],
        rhs: &[Breakpoint],
        combinator: &dyn Fn(bool, bool) -> bool,
    ) -> Vec<Breakpoint> {
        let mut out = Vec::with_capacity(lhs.len() + rhs.len());
        let (mut i, mut j) = (0, 0);
        while i < lhs.len() && j < rhs.len() {
            let (l, r) = (lhs[i], rhs[j]);
            let point = l.point.min(r.point);
            out.push(Breakpoint::new(point, combinator(l.member, r.member)));
            if l.point == point {
                i += 1;
            }
            if r.point == point {
                j += 1;
            }
        }
        out
    }
}

/// The full Unicode codepoint space, `0..=0x10FFFF`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnicodeAlphabet;

impl Alphabet for UnicodeAlphabet {
    fn minimal(&self) -> u32 {
        0
    }

    fn maximal(&self) -> u32 {
        MAX_CODEPOINT
    }
}

/// Character class in breakpoint form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ranges(Vec<Breakpoint>);

impl Ranges {
    /// Wraps an existing list. The list must end at the alphabet maximum.
    pub fn from_breakpoints(points: Vec<Breakpoint>) -> Self {
        Self(points)
    }

    pub fn empty(alphabet: &dyn Alphabet) -> Self {
        Self(alphabet.empty_ranges())
    }

    pub fn singleton(alphabet: &dyn Alphabet, codepoint: u32) -> Self {
        Self(alphabet.singleton_ranges(codepoint))
    }

    pub fn interval(alphabet: &dyn Alphabet, from: u32, to: u32) -> Self {
        Self(alphabet.interval_ranges(from, to))
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.0
    }

    /// Merges both lists and collapses equal-flag neighbours, keeping the
    /// last entry of every run.
    pub fn combine(
        lhs: &Ranges,
        rhs: &Ranges,
        alphabet: &dyn Alphabet,
        combinator: impl Fn(bool, bool) -> bool,
    ) -> Ranges {
        let raw = alphabet.zip_ranges(&lhs.0, &rhs.0, &combinator);

        let mut points: Vec<Breakpoint> = Vec::with_capacity(raw.len());
        for bp in raw {
            match points.last_mut() {
                Some(last) if last.member == bp.member => last.point = bp.point,
                _ => points.push(bp),
            }
        }

        assert_ends_at_maximal(&points, alphabet.maximal());
        Ranges(points)
    }

    pub fn union(&self, other: &Ranges, alphabet: &dyn Alphabet) -> Ranges {
        Self::combine(self, other, alphabet, |l, r| l || r)
    }

    pub fn difference(&self, other: &Ranges, alphabet: &dyn Alphabet) -> Ranges {
        Self::combine(self, other, alphabet, |l, r| l && !r)
    }

    pub fn contains(&self, codepoint: u32) -> bool {
        let idx = self.0.partition_point(|bp| bp.point < codepoint);
        self.0.get(idx).is_some_and(|bp| bp.member)
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|bp| !bp.member)
    }

    /// Number of member runs. Exact for canonical lists.
    pub fn member_run_count(&self) -> usize {
        self.0.iter().filter(|bp| bp.member).count()
    }

    pub fn is_canonical(&self) -> bool {
        self.0.windows(2).all(|w| w[0].member != w[1].member)
    }

    /// Every run, members and gaps alike.
    pub fn runs<'a>(&'a self, alphabet: &'a dyn Alphabet) -> Runs<'a> {
        Runs {
            points: self.0.iter(),
            next_from: Some(alphabet.minimal()),
            alphabet,
        }
    }

    /// Runs whose codepoints belong to the class.
    pub fn member_runs<'a>(
        &'a self,
        alphabet: &'a dyn Alphabet,
    ) -> impl Iterator<Item = Run> + 'a {
        self.runs(alphabet).filter(|run| run.member)
    }
}

/// Inclusive codepoint interval with uniform membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub from: u32,
    pub to: u32,
    pub member: bool,
}

pub struct Runs<'a> {
    points: std::slice::Iter<'a, Breakpoint>,
    next_from: Option<u32>,
    alphabet: &'a dyn Alphabet,
}

impl Iterator for Runs<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        let from = self.next_from?;
        let bp = self.points.next()?;
        self.next_from =
            (bp.point < self.alphabet.maximal()).then(|| self.alphabet.successor(bp.point));
        Some(Run {
            from,
            to: bp.point,
            member: bp.member,
        })
    }
}
