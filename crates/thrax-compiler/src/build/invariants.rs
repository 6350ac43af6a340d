//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

#[inline]
pub fn assert_no_open_def(open: Option<&str>, name: &str) {
    assert!(
        open.is_none(),
        "build: definition `{name}` started while `{}` is still open",
        open.unwrap_or_default()
    );
}

#[inline]
pub fn assert_def_open(open: Option<&str>, name: &str) {
    assert_eq!(
        open,
        Some(name),
        "build: definition closed under a different name than it was opened with"
    );
}
