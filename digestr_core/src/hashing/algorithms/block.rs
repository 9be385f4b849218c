//! 64-byte block buffering and Merkle-Damgard padding for MD5 and SHA-256

pub(crate) const BLOCK_SIZE: usize = 64;

/// Offset of the 8-byte length field in the final block
const LENGTH_OFFSET: usize = BLOCK_SIZE - 8;

/// Byte order of the trailing bit-length field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LengthOrder {
    /// MD5
    Little,
    /// SHA-256
    Big,
}

/// Collects input into whole blocks and emits the padded tail.
#[derive(Debug, Clone)]
pub(crate) struct BlockBuffer {
    buffer: [u8; BLOCK_SIZE],
    filled: usize,
    /// Total message length in bytes
    length: u64,
}

impl Default for BlockBuffer {
    fn default() -> Self {
        Self {
            buffer: [0; BLOCK_SIZE],
            filled: 0,
            length: 0,
        }
    }
}

impl BlockBuffer {
    /// Feed `data`, calling `compress` once per completed block
    pub(crate) fn absorb(&mut self, mut data: &[u8], mut compress: impl FnMut(&[u8; BLOCK_SIZE])) {
        self.length = self.length.wrapping_add(data.len() as u64);

        if self.filled > 0 {
            let take = (BLOCK_SIZE - self.filled).min(data.len());
            self.buffer[self.filled..self.filled + take].copy_from_slice(&data[..take]);
            self.filled += take;
            data = &data[take..];

            if self.filled < BLOCK_SIZE {
                return;
            }
            compress(&self.buffer);
            self.filled = 0;
        }

        let (blocks, rest) = data.as_chunks::<BLOCK_SIZE>();
        for block in blocks {
            compress(block);
        }

        self.buffer[..rest.len()].copy_from_slice(rest);
        self.filled = rest.len();
    }

    /// Append `0x80`, zero fill and the 64-bit bit length, compressing the
    /// one or two final blocks.
    ///
    /// A tail of 56 bytes or more leaves no room for the length field, so
    /// the padding spills into an extra block.
    pub(crate) fn finish(mut self, order: LengthOrder, mut compress: impl FnMut(&[u8; BLOCK_SIZE])) {
        let bit_length = self.length.wrapping_mul(8);
        let length_bytes = match order {
            LengthOrder::Little => bit_length.to_le_bytes(),
            LengthOrder::Big => bit_length.to_be_bytes(),
        };

        self.buffer[self.filled] = 0x80;
        self.buffer[self.filled + 1..].fill(0);

        if self.filled >= LENGTH_OFFSET {
            compress(&self.buffer);
            self.buffer.fill(0);
        }

        self.buffer[LENGTH_OFFSET..].copy_from_slice(&length_bytes);
        compress(&self.buffer);
    }
}
