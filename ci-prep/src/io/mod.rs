//! I/O helpers for reading the nightly configuration and writing the CI one.

pub mod files;
