//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use std::fmt::Debug;
use std::ops::Range;

use crate::ranges::Breakpoint;

#[inline]
pub(crate) fn assert_view_in_bounds(range: &Range<usize>, buf_len: usize) {
    assert!(
        range.start <= range.end && range.end <= buf_len,
        "IntSeq: view {}..{} out of bounds for buffer of length {}",
        range.start,
        range.end,
        buf_len
    );
}

#[inline]
pub(crate) fn ensure_nonempty_range<T: PartialOrd + Debug>(range: &Range<T>, what: &str) {
    assert!(
        range.start < range.end,
        "IntSeq::random: empty {what} range {range:?}"
    );
}

#[inline]
pub(crate) fn assert_ends_at_maximal(points: &[Breakpoint], maximal: u32) {
    let last = points.last().map(|bp| bp.point);
    assert_eq!(
        last,
        Some(maximal),
        "Ranges: breakpoint list must terminate at the alphabet maximum"
    );
}

#[inline]
pub(crate) fn assert_interval_in_alphabet(from: u32, to: u32, minimal: u32, maximal: u32) {
    assert!(
        minimal <= from && from <= to && to <= maximal,
        "Alphabet: interval {from}..={to} outside {minimal}..={maximal}"
    );
}
