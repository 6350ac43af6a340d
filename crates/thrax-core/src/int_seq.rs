//! Immutable codepoint sequence.
//!
//! An [`IntSeq`] is a `[offset, end)` view into a reference-counted buffer.
//! Sub-sequences share the buffer of their parent; [`IntSeq::concat`] and
//! [`IntSeq::copy`] always allocate fresh storage.
//!
//! Equality, ordering and hashing look at content only. Two views over
//! different buffers compare equal when they hold the same codepoints.

use std::cell::Cell;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;
use std::rc::Rc;

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::invariants::{assert_view_in_bounds, ensure_nonempty_range};
use crate::printable;

#[derive(Clone)]
pub struct IntSeq {
    buf: Rc<[u32]>,
    offset: usize,
    end: usize,
    /// Content hash, computed on first use.
    hash: Cell<Option<i32>>,
}

impl IntSeq {
    pub fn new(codepoints: impl Into<Rc<[u32]>>) -> Self {
        let buf = codepoints.into();
        let end = buf.len();
        Self::from_view(buf, 0..end)
    }

    /// The empty sequence.
    pub fn epsilon() -> Self {
        Self::new(Vec::new())
    }

    /// View over `range` of an existing buffer. Does not copy.
    pub fn from_view(buf: Rc<[u32]>, range: Range<usize>) -> Self {
        assert_view_in_bounds(&range, buf.len());
        Self {
            buf,
            offset: range.start,
            end: range.end,
            hash: Cell::new(None),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.offset
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offset == self.end
    }

    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.buf[self.offset..self.end]
    }

    /// Codepoint at view-relative index `i`. Panics when out of range.
    #[inline]
    pub fn at(&self, i: usize) -> u32 {
        self.as_slice()[i]
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<u32> {
        self.as_slice().get(i).copied()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = u32> + ExactSizeIterator + '_ {
        self.as_slice().iter().copied()
    }

    /// Iterates from view-relative index `from` to the end.
    pub fn iter_from(&self, from: usize) -> impl Iterator<Item = u32> + '_ {
        self.as_slice()[from..].iter().copied()
    }

    pub fn iter_rev(&self) -> impl Iterator<Item = u32> + '_ {
        self.iter().rev()
    }

    /// Suffix starting at `from`. Shares storage.
    pub fn sub(&self, from: usize) -> Self {
        self.sub_range(from, self.len())
    }

    /// View-relative slice `[from, to)`. Shares storage.
    pub fn sub_range(&self, from: usize, to: usize) -> Self {
        assert!(
            from <= to && to <= self.len(),
            "IntSeq::sub_range: {from}..{to} out of bounds for length {}",
            self.len()
        );
        Self::from_view(self.buf.clone(), self.offset + from..self.offset + to)
    }

    /// Concatenation into a freshly allocated buffer.
    pub fn concat(&self, rhs: &IntSeq) -> Self {
        let mut out = Vec::with_capacity(self.len() + rhs.len());
        out.extend_from_slice(self.as_slice());
        out.extend_from_slice(rhs.as_slice());
        Self::new(out)
    }

    /// Compacts the view into its own buffer.
    pub fn copy(&self) -> Self {
        Self::new(self.as_slice().to_vec())
    }

    /// Pointwise lexicographic order; an equal prefix ranks the shorter first.
    pub fn compare_to(&self, other: &IntSeq) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }

    /// Shortlex order: length first, content only breaks ties.
    pub fn lex_len_cmp(&self, other: &IntSeq) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.as_slice().cmp(other.as_slice()))
    }

    /// Length of the longest common prefix.
    pub fn lcp(&self, other: &IntSeq) -> usize {
        self.iter()
            .zip(other.iter())
            .take_while(|(a, b)| a == b)
            .count()
    }

    /// Compares `self.at(i)` with `other.at(i)` for every `i` in
    /// `offset_both..self.len()`, using the same index on both sides.
    ///
    /// Returns `false` when `self` is longer than `other`. Only meaningful when
    /// both sequences are known to agree below `offset_both`.
    pub fn is_prefix_of(&self, offset_both: usize, other: &IntSeq) -> bool {
        if self.len() > other.len() {
            return false;
        }
        (offset_both..self.len()).all(|i| self.at(i) == other.at(i))
    }

    pub fn index_of(&self, codepoint: u32) -> Option<usize> {
        self.iter().position(|c| c == codepoint)
    }

    pub fn last_index_of(&self, codepoint: u32) -> Option<usize> {
        self.iter().rposition(|c| c == codepoint)
    }

    pub fn contains(&self, codepoint: u32) -> bool {
        self.index_of(codepoint).is_some()
    }

    /// `31 * h + c` content hash, cached after the first call.
    pub fn hash_code(&self) -> i32 {
        if let Some(hash) = self.hash.get() {
            return hash;
        }
        let hash = self
            .iter()
            .fold(1i32, |h, c| h.wrapping_mul(31).wrapping_add(c as i32));
        self.hash.set(Some(hash));
        hash
    }

    /// Decodes to a `String`, substituting U+FFFD for non-scalar values.
    pub fn to_unicode_string(&self) -> String {
        self.iter()
            .map(|c| char::from_u32(c).unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect()
    }

    /// Raw codepoints as `[1, 2, 3]`.
    pub fn to_codepoint_string(&self) -> String {
        let items: Vec<String> = self.iter().map(|c| c.to_string()).collect();
        format!("[{}]", items.join(", "))
    }

    pub fn is_printable(&self) -> bool {
        self.iter().all(printable::is_printable_char)
    }

    /// Quoted literal (`'ab\n'`) when printable, `<97 0 7>` otherwise.
    pub fn to_string_literal(&self) -> String {
        let mut out = String::with_capacity(self.len() + 2);
        printable::write_literal(&mut out, self.as_slice()).expect("String write never fails");
        out
    }

    /// Random sequence with length drawn from `len` and codepoints from `values`.
    pub fn random(len: Range<usize>, values: Range<u32>, rng: &mut impl Rng) -> Self {
        ensure_nonempty_range(&len, "length");
        let len = rng.gen_range(len);
        Self::random_with_len(len, values, rng)
    }

    /// Random sequence of exactly `len` codepoints drawn from `values`.
    pub fn random_with_len(len: usize, values: Range<u32>, rng: &mut impl Rng) -> Self {
        ensure_nonempty_range(&values, "codepoint");
        (0..len).map(|_| rng.gen_range(values.clone())).collect()
    }
}

impl Default for IntSeq {
    fn default() -> Self {
        Self::epsilon()
    }
}

impl PartialEq for IntSeq {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for IntSeq {}

impl PartialOrd for IntSeq {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IntSeq {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_to(other)
    }
}

impl Hash for IntSeq {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

impl fmt::Display for IntSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        printable::write_literal(f, self.as_slice())
    }
}

impl fmt::Debug for IntSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntSeq{}", self.to_codepoint_string())
    }
}

impl From<&str> for IntSeq {
    fn from(s: &str) -> Self {
        s.chars().map(u32::from).collect()
    }
}

impl From<Vec<u32>> for IntSeq {
    fn from(codepoints: Vec<u32>) -> Self {
        Self::new(codepoints)
    }
}

impl From<&[u32]> for IntSeq {
    fn from(codepoints: &[u32]) -> Self {
        Self::new(codepoints)
    }
}

impl FromIterator<u32> for IntSeq {
    fn from_iter<T: IntoIterator<Item = u32>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect::<Vec<_>>())
    }
}

impl Serialize for IntSeq {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for IntSeq {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<u32>::deserialize(deserializer).map(Self::new)
    }
}
