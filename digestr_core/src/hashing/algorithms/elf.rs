//! ELF hash (the System V ABI symbol-table hash)

use crate::digest::Digest;
use crate::hashing::traits::{
    DEFAULT_BUFFER_SIZE, DigestCore, MessageHash, drive_bytes, drive_stream,
};
use std::io::{Read, Seek};

/// ELF hash
#[derive(Debug, Clone)]
pub struct Elf {
    digest: Digest,
    buffer_size: usize,
}

impl Elf {
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

impl Default for Elf {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
struct ElfCore(u32);

impl DigestCore for ElfCore {
    fn absorb(&mut self, data: &[u8]) {
        for &byte in data {
            let mut h = (self.0 << 4).wrapping_add(u32::from(byte));
            let top = h & 0xF000_0000;
            if top != 0 {
                h ^= top >> 24;
            }
            self.0 = h & !top;
        }
    }

    fn finish(self, out: &mut Digest) {
        out.set_words(&[self.0]);
    }
}

impl MessageHash for Elf {
    fn id(&self) -> &'static str {
        "elf"
    }

    fn display_name(&self) -> &'static str {
        "ELF"
    }

    fn hash_size_bits(&self) -> u32 {
        Self::HASH_SIZE_BITS
    }

    fn digest(&self) -> &Digest {
        &self.digest
    }

    fn compute_bytes(&mut self, data: &[u8]) -> &Digest {
        drive_bytes::<ElfCore>(&mut self.digest, data);
        &self.digest
    }

    fn compute_stream<S: Read + Seek + ?Sized>(&mut self, source: &mut S) -> &Digest {
        drive_stream::<ElfCore, S>(&mut self.digest, source, self.buffer_size, "elf");
        &self.digest
    }
}
