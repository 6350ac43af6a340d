//! Test-only dump methods for compilation inspection.

#[cfg(test)]
mod test_helpers {
    use crate::Compilation;

    impl<'a> Compilation<'a> {
        pub fn dump_cst(&self) -> String {
            self.printer().dump()
        }

        pub fn dump_cst_full(&self) -> String {
            self.printer().with_trivia(true).dump()
        }

        pub fn dump_symbols(&self) -> String {
            self.printer().only_symbols(true).dump()
        }

        /// One `severity at start..end: message` line per diagnostic, cascades removed.
        pub fn dump_diagnostics(&self) -> String {
            self.diagnostics().filtered().printer().render()
        }

        pub fn dump_diagnostics_raw(&self) -> String {
            self.diagnostics().printer().render()
        }

        #[track_caller]
        pub fn expect(source: &'a str) -> Self {
            Compilation::try_from(source).expect("fuel is not exhausted")
        }

        #[track_caller]
        pub fn expect_valid(source: &'a str) -> Self {
            let compilation = Self::expect(source);
            if !compilation.is_valid() {
                panic!(
                    "Expected valid source, got error:\n{}",
                    compilation.dump_diagnostics()
                );
            }
            compilation
        }

        #[track_caller]
        pub fn expect_valid_cst(source: &'a str) -> String {
            Self::expect_valid(source).dump_cst()
        }

        #[track_caller]
        pub fn expect_valid_solomonoff(source: &'a str) -> String {
            Self::expect_valid(source).to_solomonoff()
        }

        #[track_caller]
        pub fn expect_invalid(source: &'a str) -> String {
            let compilation = Self::expect(source);
            if compilation.is_valid() {
                panic!(
                    "Expected invalid source, got valid:\n{}",
                    compilation.dump_cst()
                );
            }
            compilation.dump_diagnostics()
        }
    }
}
