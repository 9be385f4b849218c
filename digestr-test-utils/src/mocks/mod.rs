//! Mock implementations for testing

mod reader;

pub use reader::{FailingReader, ShortReader};
