//! Deterministic, pure logic for building the CI configuration.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! text and return deterministic outputs suitable for tests.

pub mod blocks;
pub mod flags;
pub mod preamble;
pub mod selector;
