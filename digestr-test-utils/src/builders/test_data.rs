//! Test data builders for creating test inputs

use digestr_core::{Result, error::IoError};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Message lengths around the 64-byte block and 56-byte padding limits
pub const BOUNDARY_LENGTHS: [usize; 11] = [0, 1, 55, 56, 57, 63, 64, 65, 119, 120, 128];

/// Builder for deterministic byte payloads
#[derive(Debug, Clone)]
pub struct TestDataBuilder {
    size: usize,
    seed: u64,
    fill: Option<u8>,
}

impl TestDataBuilder {
    /// Create a new test data builder
    pub fn new() -> Self {
        Self {
            size: 1024,
            seed: 0,
            fill: None,
        }
    }

    /// Set payload size in bytes
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Seed the pseudo-random content
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Repeat a single byte instead of pseudo-random content
    pub fn filled_with(mut self, byte: u8) -> Self {
        self.fill = Some(byte);
        self
    }

    /// Build the payload
    pub fn build(&self) -> Vec<u8> {
        if let Some(byte) = self.fill {
            return vec![byte; self.size];
        }

        // 64-bit LCG, high byte of each step
        let mut state = self.seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        (0..self.size)
            .map(|_| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                (state >> 56) as u8
            })
            .collect()
    }
}

impl Default for TestDataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Test file builder backed by a temporary directory
pub struct TestFileBuilder {
    dir: TempDir,
    generated_files: Vec<PathBuf>,
}

impl TestFileBuilder {
    /// Create a builder with a fresh temporary directory
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
            generated_files: Vec::new(),
        })
    }

    /// Directory the files are written to
    pub fn base_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Files written so far
    pub fn generated_files(&self) -> &[PathBuf] {
        &self.generated_files
    }

    /// Write `content` to `name` inside the base directory
    pub fn generate_file(&mut self, name: &str, content: &[u8]) -> Result<PathBuf> {
        let file_path = self.dir.path().join(name);

        std::fs::write(&file_path, content)
            .map_err(|e| IoError::from(e).with_path(&file_path))?;

        self.generated_files.push(file_path.clone());
        Ok(file_path)
    }

    /// Generate a deterministic file with specific size and seed
    pub fn generate_deterministic_file(
        &mut self,
        name: &str,
        size: usize,
        seed: u64,
    ) -> Result<PathBuf> {
        let content = TestDataBuilder::new()
            .with_size(size)
            .with_seed(seed)
            .build();
        self.generate_file(name, &content)
    }

    /// Path inside the base directory that does not exist
    pub fn missing_path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_is_deterministic() {
        let a = TestDataBuilder::new().with_size(256).with_seed(7).build();
        let b = TestDataBuilder::new().with_size(256).with_seed(7).build();
        let c = TestDataBuilder::new().with_size(256).with_seed(8).build();

        assert_eq!(a.len(), 256);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_filled_payload() {
        let data = TestDataBuilder::new().with_size(10).filled_with(b'a').build();
        assert_eq!(data, b"aaaaaaaaaa");
    }

    #[test]
    fn test_file_builder_writes_files() {
        let mut builder = TestFileBuilder::new().unwrap();
        let path = builder.generate_file("abc.txt", b"abc").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"abc");
        assert_eq!(builder.generated_files(), &[path]);
        assert!(!builder.missing_path("nope.bin").exists());
    }
}
