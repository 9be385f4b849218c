//! Digestr CLI library
//!
//! Configuration, output formatting and error reporting for the `digestr`
//! binary, exposed as a library so integration tests can reach them.

pub mod config;
pub mod error;
pub mod output;
pub mod terminal;
