//! Test utilities and snapshot macros.

/// Snapshot test for CST output.
#[macro_export]
macro_rules! shot_cst {
    ($source:literal, @$snapshot:literal) => {{
        let source = indoc::indoc!($source).trim();
        let output = $crate::Compilation::expect_valid_cst(source);
        insta::assert_snapshot!(output, @$snapshot);
    }};
}

/// Snapshot test for the canonical serialization.
#[macro_export]
macro_rules! shot_solomonoff {
    ($source:literal, @$snapshot:literal) => {{
        let source = indoc::indoc!($source).trim();
        let output = $crate::Compilation::expect_valid_solomonoff(source);
        insta::assert_snapshot!(output, @$snapshot);
    }};
}

/// Snapshot test for error diagnostics.
#[macro_export]
macro_rules! shot_error {
    ($source:literal, @$snapshot:literal) => {{
        let source = indoc::indoc!($source).trim();
        let output = $crate::Compilation::expect_invalid(source);
        insta::assert_snapshot!(output, @$snapshot);
    }};
}
