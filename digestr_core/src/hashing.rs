//! Hash calculation for the Digestr Core Library
//!
//! [`HashAlgorithm`] names the supported algorithms, [`Hasher`] holds one
//! concrete instance behind a single type, and [`HashCalculator`] runs them
//! over buffers, streams and files, producing [`HashResult`] values.

use crate::file_io::{CountingReader, open_source};
use crate::{Digest, Error, Result, error::ValidationError};
use serde::{Deserialize, Serialize};
use std::io::{Read, Seek};
use std::path::Path;
use std::time::{Duration, Instant};

mod algorithms;
mod traits;

pub use algorithms::{Adler32, Crc32, Elf, Md5, Sha256};
pub use traits::{DEFAULT_BUFFER_SIZE, MIN_BUFFER_SIZE, MessageHash};

/// Hash algorithms supported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    /// Adler-32 checksum
    ADLER32,
    /// CRC-32 (IEEE) checksum
    CRC32,
    /// ELF symbol hash
    ELF,
    /// MD5 message digest
    MD5,
    /// SHA-256 message digest
    SHA256,
}

impl HashAlgorithm {
    /// Every supported algorithm, in output order
    pub const ALL: [HashAlgorithm; 5] = [
        HashAlgorithm::MD5,
        HashAlgorithm::SHA256,
        HashAlgorithm::CRC32,
        HashAlgorithm::ADLER32,
        HashAlgorithm::ELF,
    ];

    /// Label used in user-facing output
    pub fn display_name(&self) -> &'static str {
        match self {
            HashAlgorithm::ADLER32 => "Adler-32",
            HashAlgorithm::CRC32 => "CRC-32",
            HashAlgorithm::ELF => "ELF",
            HashAlgorithm::MD5 => "MD5",
            HashAlgorithm::SHA256 => "SHA-256",
        }
    }

    /// Digest width in bits
    pub fn hash_size_bits(&self) -> u32 {
        match self {
            HashAlgorithm::ADLER32 => Adler32::HASH_SIZE_BITS,
            HashAlgorithm::CRC32 => Crc32::HASH_SIZE_BITS,
            HashAlgorithm::ELF => Elf::HASH_SIZE_BITS,
            HashAlgorithm::MD5 => Md5::HASH_SIZE_BITS,
            HashAlgorithm::SHA256 => Sha256::HASH_SIZE_BITS,
        }
    }

    /// Fresh instance using the default stream buffer size
    pub fn create(&self) -> Hasher {
        self.create_with_buffer_size(DEFAULT_BUFFER_SIZE)
    }

    /// Fresh instance reading streams `buffer_size` bytes at a time
    pub fn create_with_buffer_size(&self, buffer_size: usize) -> Hasher {
        match self {
            HashAlgorithm::ADLER32 => Hasher::Adler32(Adler32::with_buffer_size(buffer_size)),
            HashAlgorithm::CRC32 => Hasher::Crc32(Crc32::with_buffer_size(buffer_size)),
            HashAlgorithm::ELF => Hasher::Elf(Elf::with_buffer_size(buffer_size)),
            HashAlgorithm::MD5 => Hasher::Md5(Md5::with_buffer_size(buffer_size)),
            HashAlgorithm::SHA256 => Hasher::Sha256(Sha256::with_buffer_size(buffer_size)),
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashAlgorithm::ADLER32 => write!(f, "adler32"),
            HashAlgorithm::CRC32 => write!(f, "crc32"),
            HashAlgorithm::ELF => write!(f, "elf"),
            HashAlgorithm::MD5 => write!(f, "md5"),
            HashAlgorithm::SHA256 => write!(f, "sha256"),
        }
    }
}

impl std::str::FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "adler32" | "adler-32" | "adler" => Ok(HashAlgorithm::ADLER32),
            "crc32" | "crc-32" | "crc" => Ok(HashAlgorithm::CRC32),
            "elf" | "elfhash" => Ok(HashAlgorithm::ELF),
            "md5" => Ok(HashAlgorithm::MD5),
            "sha256" | "sha-256" => Ok(HashAlgorithm::SHA256),
            _ => Err(Error::Validation(ValidationError::unknown_algorithm(s))),
        }
    }
}

/// One algorithm instance of any supported kind
#[derive(Debug, Clone)]
pub enum Hasher {
    Adler32(Adler32),
    Crc32(Crc32),
    Elf(Elf),
    Md5(Md5),
    Sha256(Sha256),
}

macro_rules! forward {
    ($self:expr, $inner:ident => $call:expr) => {
        match $self {
            Hasher::Adler32($inner) => $call,
            Hasher::Crc32($inner) => $call,
            Hasher::Elf($inner) => $call,
            Hasher::Md5($inner) => $call,
            Hasher::Sha256($inner) => $call,
        }
    };
}

impl Hasher {
    /// Which algorithm this instance runs
    pub fn algorithm(&self) -> HashAlgorithm {
        match self {
            Hasher::Adler32(_) => HashAlgorithm::ADLER32,
            Hasher::Crc32(_) => HashAlgorithm::CRC32,
            Hasher::Elf(_) => HashAlgorithm::ELF,
            Hasher::Md5(_) => HashAlgorithm::MD5,
            Hasher::Sha256(_) => HashAlgorithm::SHA256,
        }
    }
}

impl MessageHash for Hasher {
    fn id(&self) -> &'static str {
        forward!(self, h => h.id())
    }

    fn display_name(&self) -> &'static str {
        forward!(self, h => h.display_name())
    }

    fn hash_size_bits(&self) -> u32 {
        forward!(self, h => h.hash_size_bits())
    }

    fn digest(&self) -> &Digest {
        forward!(self, h => h.digest())
    }

    fn compute_bytes(&mut self, data: &[u8]) -> &Digest {
        forward!(self, h => h.compute_bytes(data))
    }

    fn compute_stream<S: Read + Seek + ?Sized>(&mut self, source: &mut S) -> &Digest {
        forward!(self, h => h.compute_stream(source))
    }
}

/// Result of hash calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashResult {
    pub algorithm: HashAlgorithm,
    /// Lowercase hex rendering of `words`
    pub hash: String,
    pub words: Vec<u32>,
    /// Bytes hashed; 0 when the read failed
    pub input_size: u64,
    /// The stream could not be read and `hash` is the zero digest
    #[serde(default)]
    pub read_failed: bool,
    pub duration: Duration,
}

impl HashResult {
    fn from_digest(
        algorithm: HashAlgorithm,
        digest: &Digest,
        input_size: u64,
        start: Instant,
    ) -> Self {
        Self {
            algorithm,
            hash: digest.to_hex_string(),
            words: digest.words().to_vec(),
            input_size,
            read_failed: false,
            duration: start.elapsed(),
        }
    }

    fn failed_read(algorithm: HashAlgorithm, digest: &Digest, start: Instant) -> Self {
        Self {
            read_failed: true,
            ..Self::from_digest(algorithm, digest, 0, start)
        }
    }
}

/// Hash calculator for buffers, streams and files
#[derive(Debug, Clone)]
pub struct HashCalculator {
    buffer_size: usize,
}

impl HashCalculator {
    /// Create a new hash calculator
    pub fn new() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Create a calculator that reads streams `buffer_size` bytes at a time.
    ///
    /// Sizes below [`MIN_BUFFER_SIZE`] are raised to it.
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self {
            buffer_size: buffer_size.max(MIN_BUFFER_SIZE),
        }
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Calculate hash for byte data
    pub fn calculate_bytes(&self, algorithm: HashAlgorithm, data: &[u8]) -> HashResult {
        let start = Instant::now();
        let mut hasher = algorithm.create();
        let digest = hasher.compute_bytes(data);

        log::debug!("{algorithm}: hashed {} bytes from buffer", data.len());
        HashResult::from_digest(algorithm, digest, data.len() as u64, start)
    }

    /// Calculate hash for the UTF-8 bytes of a string
    pub fn calculate_str(&self, algorithm: HashAlgorithm, text: &str) -> HashResult {
        self.calculate_bytes(algorithm, text.as_bytes())
    }

    /// Calculate hash for a stream from its current position to the end.
    ///
    /// A read failure produces the all-zero digest; the stream is left at
    /// offset 0 either way.
    pub fn calculate_stream<S: Read + Seek + ?Sized>(
        &self,
        algorithm: HashAlgorithm,
        source: &mut S,
    ) -> HashResult {
        let start = Instant::now();
        let mut hasher = algorithm.create_with_buffer_size(self.buffer_size);
        let mut counting = CountingReader::new(source);
        let digest = hasher.compute_stream(&mut counting);

        if counting.failed() {
            HashResult::failed_read(algorithm, digest, start)
        } else {
            HashResult::from_digest(algorithm, digest, counting.count(), start)
        }
    }

    /// Calculate hash for a file
    pub fn calculate_file(&self, file_path: &Path, algorithm: HashAlgorithm) -> Result<HashResult> {
        let mut source = open_source(file_path)?;
        Ok(self.calculate_stream(algorithm, &mut source))
    }

    /// Calculate several hashes over one opened file, in the order given
    pub fn calculate_multiple(
        &self,
        file_path: &Path,
        algorithms: &[HashAlgorithm],
    ) -> Result<Vec<HashResult>> {
        if algorithms.is_empty() {
            return Ok(Vec::new());
        }

        let mut source = open_source(file_path)?;
        let results = algorithms
            .iter()
            .map(|&algorithm| self.calculate_stream(algorithm, &mut source))
            .collect();

        Ok(results)
    }
}

impl Default for HashCalculator {
    fn default() -> Self {
        Self::new()
    }
}
