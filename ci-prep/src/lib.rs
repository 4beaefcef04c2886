//! CI configuration generator for the regression test suite.
//!
//! Turns the nightly `WarpX-tests.ini` into a `ci-tests.ini` tailored to one
//! CI job, selected through environment flags. The crate keeps a strict
//! separation:
//!
//! - **[`core`]**: Pure, deterministic text rewriting and test selection.
//! - **[`io`]**: Reading and writing configuration files.
//!
//! [`prepare`] coordinates both to implement the CLI.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod prepare;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
