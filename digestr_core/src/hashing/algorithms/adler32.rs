//! Adler-32 checksum (RFC 1950)

use crate::digest::Digest;
use crate::hashing::traits::{
    DEFAULT_BUFFER_SIZE, DigestCore, MessageHash, drive_bytes, drive_stream,
};
use std::io::{Read, Seek};

/// Largest prime below 2^16
const MOD_ADLER: u32 = 65521;

/// Adler-32 checksum
#[derive(Debug, Clone)]
pub struct Adler32 {
    digest: Digest,
    buffer_size: usize,
}

impl Adler32 {
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

impl Default for Adler32 {
    fn default() -> Self {
        Self::new()
    }
}

struct Adler32Core {
    a: u32,
    b: u32,
}

impl Default for Adler32Core {
    fn default() -> Self {
        Self { a: 1, b: 0 }
    }
}

impl DigestCore for Adler32Core {
    fn absorb(&mut self, data: &[u8]) {
        for &byte in data {
            self.a = (self.a + u32::from(byte)) % MOD_ADLER;
            self.b = (self.b + self.a) % MOD_ADLER;
        }
    }

    fn finish(self, out: &mut Digest) {
        out.set_words(&[(self.b << 16) | self.a]);
    }
}

impl MessageHash for Adler32 {
    fn id(&self) -> &'static str {
        "adler32"
    }

    fn display_name(&self) -> &'static str {
        "Adler-32"
    }

    fn hash_size_bits(&self) -> u32 {
        Self::HASH_SIZE_BITS
    }

    fn digest(&self) -> &Digest {
        &self.digest
    }

    fn compute_bytes(&mut self, data: &[u8]) -> &Digest {
        drive_bytes::<Adler32Core>(&mut self.digest, data);
        &self.digest
    }

    fn compute_stream<S: Read + Seek + ?Sized>(&mut self, source: &mut S) -> &Digest {
        drive_stream::<Adler32Core, S>(&mut self.digest, source, self.buffer_size, "adler32");
        &self.digest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let mut adler = Adler32::new();
        assert_eq!(adler.compute_bytes(b"").to_hex_string(), "00000001");
    }

    #[test]
    fn test_known_values() {
        let mut adler = Adler32::new();
        assert_eq!(adler.compute_str("Wikipedia").words(), &[0x11E6_0398]);
        assert_eq!(adler.compute_str("abc").to_hex_string(), "024d0127");
        // 403375133 = 0x180b041d
        assert_eq!(adler.compute_str("Hello World").words(), &[403_375_133]);
    }

    #[test]
    fn test_modulus_wraps() {
        // 0xff bytes push A past the modulus quickly
        let data = vec![0xff; 5552];
        let mut a: u64 = 1;
        let mut b: u64 = 0;
        for &byte in &data {
            a = (a + byte as u64) % 65521;
            b = (b + a) % 65521;
        }

        let mut adler = Adler32::new();
        assert_eq!(adler.compute_bytes(&data).words(), &[((b << 16) | a) as u32]);
    }
}
