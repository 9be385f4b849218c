//! Builders for test inputs and files

mod test_data;

pub use test_data::{BOUNDARY_LENGTHS, TestDataBuilder, TestFileBuilder};
