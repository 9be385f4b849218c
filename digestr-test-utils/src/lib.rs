//! Test utilities for digestr
//!
//! This crate provides known-answer vectors, file builders and reader
//! mocks for testing the digest engine and the CLI.

pub mod builders;
pub mod mocks;
pub mod vectors;

// Re-export commonly used types
pub use builders::{TestDataBuilder, TestFileBuilder};
pub use mocks::{FailingReader, ShortReader};
pub use vectors::{KNOWN_VECTORS, KnownVector};
