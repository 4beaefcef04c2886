//! Stable exit codes for the `ci-prep` binary.

/// `ci-tests.ini` was written.
pub const OK: i32 = 0;
/// Missing input, unwritable output or any other failure. No output written.
pub const INVALID: i32 = 1;
