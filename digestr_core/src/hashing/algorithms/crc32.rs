//! CRC-32 (IEEE 802.3, reflected) checksum

use crate::digest::Digest;
use crate::hashing::traits::{
    DEFAULT_BUFFER_SIZE, DigestCore, MessageHash, drive_bytes, drive_stream,
};
use std::io::{Read, Seek};

/// Reversed representation of 0x04C11DB7
const POLYNOMIAL: u32 = 0xEDB8_8320;

static CRC32_TABLE: [u32; 256] = build_table();

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut n = 0;
    while n < 256 {
        let mut value = n as u32;
        let mut bit = 0;
        while bit < 8 {
            value = if value & 1 == 1 {
                (value >> 1) ^ POLYNOMIAL
            } else {
                value >> 1
            };
            bit += 1;
        }
        table[n] = value;
        n += 1;
    }
    table
}

/// CRC-32 checksum
#[derive(Debug, Clone)]
pub struct Crc32 {
    digest: Digest,
    buffer_size: usize,
}

impl Crc32 {
    pub const HASH_SIZE_BITS: u32 = 32;

    pub fn new() -> Self {
        Self::with_buffer_size(DEFAULT_BUFFER_SIZE)
    }

    /// Use `buffer_size` bytes per read when hashing streams
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self {
            digest: Digest::new(Self::HASH_SIZE_BITS),
            buffer_size,
        }
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

struct Crc32Core(u32);

impl Default for Crc32Core {
    fn default() -> Self {
        Self(u32::MAX)
    }
}

impl DigestCore for Crc32Core {
    fn absorb(&mut self, data: &[u8]) {
        for &byte in data {
            let index = ((self.0 & 0xFF) as u8 ^ byte) as usize;
            self.0 = (self.0 >> 8) ^ CRC32_TABLE[index];
        }
    }

    fn finish(self, out: &mut Digest) {
        out.set_words(&[!self.0]);
    }
}

impl MessageHash for Crc32 {
    fn id(&self) -> &'static str {
        "crc32"
    }

    fn display_name(&self) -> &'static str {
        "CRC-32"
    }

    fn hash_size_bits(&self) -> u32 {
        Self::HASH_SIZE_BITS
    }

    fn digest(&self) -> &Digest {
        &self.digest
    }

    fn compute_bytes(&mut self, data: &[u8]) -> &Digest {
        drive_bytes::<Crc32Core>(&mut self.digest, data);
        &self.digest
    }

    fn compute_stream<S: Read + Seek + ?Sized>(&mut self, source: &mut S) -> &Digest {
        drive_stream::<Crc32Core, S>(&mut self.digest, source, self.buffer_size, "crc32");
        &self.digest
    }
}
