//! Digestr Core Library
//!
//! Digest engine for Adler-32, CRC-32, the ELF hash, MD5 and SHA-256.
//! Every algorithm consumes a complete input (byte slice, string or
//! seekable stream) and stores its result in a fixed-width [`Digest`].

pub mod digest;
pub mod error;
pub mod file_io;
pub mod hashing;

// Re-export main types
pub use digest::Digest;
pub use error::{Error, Result};
pub use file_io::{open_source, rewind_quietly};
pub use hashing::{
    Adler32, Crc32, Elf, HashAlgorithm, HashCalculator, HashResult, Hasher, Md5, MessageHash,
    Sha256,
};
