//! Fixed-width digest storage shared by every algorithm

use std::fmt;

/// Output words of a hash or checksum.
///
/// The word count is fixed when the digest is created and never changes;
/// only the values are overwritten by each computation. Words are kept in
/// output order, so rendering is a plain concatenation of each word as
/// eight lowercase hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest {
    words: Vec<u32>,
}

impl Digest {
    /// Create an all-zero digest `bits` wide (rounded down to whole words)
    pub fn new(bits: u32) -> Self {
        Self {
            words: vec![0; (bits / 32) as usize],
        }
    }

    /// Zero every word, keeping the width
    pub fn reset(&mut self) {
        self.words.fill(0);
    }

    /// Number of 32-bit words
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Width in bits
    pub fn bits(&self) -> u32 {
        self.words.len() as u32 * 32
    }

    /// Borrow the words in output order
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Copy the words verbatim into `out`, returning how many were written.
    ///
    /// Copies `min(out.len(), word_count())` words.
    pub fn copy_to_words(&self, out: &mut [u32]) -> usize {
        let count = out.len().min(self.words.len());
        out[..count].copy_from_slice(&self.words[..count]);
        count
    }

    /// Render as lowercase hex, 8 characters per word
    pub fn to_hex_string(&self) -> String {
        self.to_string()
    }

    /// Whether every word is zero
    pub fn is_zero(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    pub(crate) fn set_words(&mut self, words: &[u32]) {
        debug_assert_eq!(words.len(), self.words.len());
        self.words.copy_from_slice(words);
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for word in &self.words {
            write!(f, "{word:08x}")?;
        }
        Ok(())
    }
}
