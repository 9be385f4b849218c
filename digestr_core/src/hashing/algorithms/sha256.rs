//! SHA-256 ([FIPS 180-4](https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.180-4.pdf))

use super::block::{BLOCK_SIZE, BlockBuffer, LengthOrder};
use crate::digest::Digest;
use crate::hashing::traits::{
    DEFAULT_BUFFER_SIZE, DigestCore, MessageHash, drive_bytes, drive_stream,
};
use std::io::{Read, Seek};

const INITIAL_STATE: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

/// First 32 bits of the fractional parts of the cube roots of the first 64 primes
const K: [u32; 64] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
    0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
    0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
    0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
    0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

#[inline]
fn ch(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (!x & z)
}

#[inline]
fn maj(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (x & z) ^ (y & z)
}

#[inline]
fn big_sigma0(x: u32) -> u32 {
    x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

#[inline]
fn big_sigma1(x: u32) -> u32 {
    x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

#[inline]
fn small_sigma0(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

#[inline]
fn small_sigma1(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

fn compress(state: &mut [u32; 8], block: &[u8; BLOCK_SIZE]) {
    let mut w = [0u32; 64];
    for (word, bytes) in w.iter_mut().zip(block.as_chunks::<4>().0) {
        *word = u32::from_be_bytes(*bytes);
    }
    for t in 16..64 {
        w[t] = small_sigma1(w[t - 2])
            .wrapping_add(w[t - 7])
            .wrapping_add(small_sigma0(w[t - 15]))
            .wrapping_add(w[t - 16]);
    }

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for t in 0..64 {
        let t1 = h
            .wrapping_add(big_sigma1(e))
            .wrapping_add(ch(e, f, g))
            .wrapping_add(K[t])
            .wrapping_add(w[t]);
        let t2 = big_sigma0(a).wrapping_add(maj(a, b, c));

        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.wrapping_add(t2);
    }

    for (chain, value) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *chain = chain.wrapping_add(value);
    }
}

/// SHA-256 digest
#[derive(Debug, Clone)]
pub struct Sha256 {
    digest: Digest,
    buffer_size: usize,
}

impl Sha256 {
    pub const HASH_SIZE_BITS: u32 = 256;

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

impl Default for Sha256 {
    fn default() -> Self {
        Self::new()
    }
}

struct Sha256Core {
    state: [u32; 8],
    block: BlockBuffer,
}

impl Default for Sha256Core {
    fn default() -> Self {
        Self {
            state: INITIAL_STATE,
            block: BlockBuffer::default(),
        }
    }
}

impl DigestCore for Sha256Core {
    fn absorb(&mut self, data: &[u8]) {
        let state = &mut self.state;
        self.block.absorb(data, |block| compress(state, block));
    }

    fn finish(mut self, out: &mut Digest) {
        let state = &mut self.state;
        self.block
            .finish(LengthOrder::Big, |block| compress(state, block));
        out.set_words(&self.state);
    }
}

impl MessageHash for Sha256 {
    fn id(&self) -> &'static str {
        "sha256"
    }

    fn display_name(&self) -> &'static str {
        "SHA-256"
    }

    fn hash_size_bits(&self) -> u32 {
        Self::HASH_SIZE_BITS
    }

    fn digest(&self) -> &Digest {
        &self.digest
    }

    fn compute_bytes(&mut self, data: &[u8]) -> &Digest {
        drive_bytes::<Sha256Core>(&mut self.digest, data);
        &self.digest
    }

    fn compute_stream<S: Read + Seek + ?Sized>(&mut self, source: &mut S) -> &Digest {
        drive_stream::<Sha256Core, S>(&mut self.digest, source, self.buffer_size, "sha256");
        &self.digest
    }
}
