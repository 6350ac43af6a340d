pub mod check;
pub mod compile;
pub mod dump;
pub mod run_common;
pub mod source_loader;

#[cfg(test)]
mod source_loader_tests;
