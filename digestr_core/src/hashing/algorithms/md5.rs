//! MD5 message digest ([RFC 1321](https://datatracker.ietf.org/doc/html/rfc1321))
//!
//! Message words are packed little-endian. The chaining variables are
//! byte-swapped on output so that rendering the words in order yields the
//! conventional digest string.

use super::block::{BLOCK_SIZE, BlockBuffer, LengthOrder};
use crate::digest::Digest;
use crate::hashing::traits::{
    DEFAULT_BUFFER_SIZE, DigestCore, MessageHash, drive_bytes, drive_stream,
};
use std::io::{Read, Seek};

const INITIAL_STATE: [u32; 4] = [0x6745_2301, 0xefcd_ab89, 0x98ba_dcfe, 0x1032_5476];

/// Left-rotation amounts, one row of four per round
const SHIFTS: [u32; 64] = [
    7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, //
    5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20, //
    4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, //
    6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21,
];

/// floor(2^32 * |sin(i)|) for i = 1..=64
const T: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee, 0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be, 0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa, 0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed, 0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c, 0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05, 0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039, 0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1, 0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

#[inline]
fn f(b: u32, c: u32, d: u32) -> u32 {
    (b & c) | (!b & d)
}

#[inline]
fn g(b: u32, c: u32, d: u32) -> u32 {
    (b & d) | (c & !d)
}

#[inline]
fn h(b: u32, c: u32, d: u32) -> u32 {
    b ^ c ^ d
}

#[inline]
fn i(b: u32, c: u32, d: u32) -> u32 {
    c ^ (b | !d)
}

/// One 64-step pass over a block, added back into `state`
fn compress(state: &mut [u32; 4], block: &[u8; BLOCK_SIZE]) {
    let mut m = [0u32; 16];
    for (word, bytes) in m.iter_mut().zip(block.as_chunks::<4>().0) {
        *word = u32::from_le_bytes(*bytes);
    }

    let [mut a, mut b, mut c, mut d] = *state;

    for step in 0..64 {
        let (mix, index) = match step / 16 {
            0 => (f(b, c, d), step),
            1 => (g(b, c, d), (5 * step + 1) % 16),
            2 => (h(b, c, d), (3 * step + 5) % 16),
            _ => (i(b, c, d), (7 * step) % 16),
        };

        let rotated = a
            .wrapping_add(mix)
            .wrapping_add(m[index])
            .wrapping_add(T[step])
            .rotate_left(SHIFTS[step]);

        (a, b, c, d) = (d, b.wrapping_add(rotated), b, c);
    }

    for (chain, value) in state.iter_mut().zip([a, b, c, d]) {
        *chain = chain.wrapping_add(value);
    }
}

/// MD5 digest
#[derive(Debug, Clone)]
pub struct Md5 {
    digest: Digest,
    buffer_size: usize,
}

impl Md5 {
    pub const HASH_SIZE_BITS: u32 = 128;

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

impl Default for Md5 {
    fn default() -> Self {
        Self::new()
    }
}

struct Md5Core {
    state: [u32; 4],
    block: BlockBuffer,
}

impl Default for Md5Core {
    fn default() -> Self {
        Self {
            state: INITIAL_STATE,
            block: BlockBuffer::default(),
        }
    }
}

impl DigestCore for Md5Core {
    fn absorb(&mut self, data: &[u8]) {
        let state = &mut self.state;
        self.block.absorb(data, |block| compress(state, block));
    }

    fn finish(mut self, out: &mut Digest) {
        let state = &mut self.state;
        self.block
            .finish(LengthOrder::Little, |block| compress(state, block));
        out.set_words(&self.state.map(u32::swap_bytes));
    }
}

impl MessageHash for Md5 {
    fn id(&self) -> &'static str {
        "md5"
    }

    fn display_name(&self) -> &'static str {
        "MD5"
    }

    fn hash_size_bits(&self) -> u32 {
        Self::HASH_SIZE_BITS
    }

    fn digest(&self) -> &Digest {
        &self.digest
    }

    fn compute_bytes(&mut self, data: &[u8]) -> &Digest {
        drive_bytes::<Md5Core>(&mut self.digest, data);
        &self.digest
    }

    fn compute_stream<S: Read + Seek + ?Sized>(&mut self, source: &mut S) -> &Digest {
        drive_stream::<Md5Core, S>(&mut self.digest, source, self.buffer_size, "md5");
        &self.digest
    }
}
