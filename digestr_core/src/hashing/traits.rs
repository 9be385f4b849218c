//! Core traits shared by every digest algorithm

use crate::digest::Digest;
use crate::file_io::rewind_quietly;
use std::io::{ErrorKind, Read, Seek};

/// Default read buffer size for stream hashing
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Smallest accepted read buffer size (one MD5/SHA-256 block)
pub const MIN_BUFFER_SIZE: usize = 64;

/// Uniform interface over the supported algorithms.
///
/// Every `compute_*` call starts from a zeroed digest and runs the whole
/// algorithm over one complete input, so reusing an instance never leaks
/// state from a previous input.
pub trait MessageHash {
    /// Canonical lowercase identifier, e.g. `"sha256"`
    fn id(&self) -> &'static str;

    /// Label used in user-facing output, e.g. `"SHA-256"`
    fn display_name(&self) -> &'static str;

    /// Digest width in bits
    fn hash_size_bits(&self) -> u32;

    /// Result of the most recent computation (all zero before the first)
    fn digest(&self) -> &Digest;

    /// Hash an in-memory buffer
    fn compute_bytes(&mut self, data: &[u8]) -> &Digest;

    /// Hash the raw UTF-8 bytes of `text`
    fn compute_str(&mut self, text: &str) -> &Digest {
        self.compute_bytes(text.as_bytes())
    }

    /// Hash a stream from its current position to the end.
    ///
    /// A read failure yields the all-zero digest instead of an error. On
    /// return the stream is positioned at offset 0, whether or not the read
    /// succeeded.
    fn compute_stream<S: Read + Seek + ?Sized>(&mut self, source: &mut S) -> &Digest;

    /// Hex rendering of the current digest
    fn to_hex_string(&self) -> String {
        self.digest().to_hex_string()
    }
}

/// Per-computation working state of one algorithm.
///
/// Lives only for the duration of a single `compute_*` call.
pub(crate) trait DigestCore: Default {
    /// Fold more input into the state
    fn absorb(&mut self, data: &[u8]);

    /// Finalise and store the output words
    fn finish(self, out: &mut Digest);
}

/// Run `C` over a complete buffer
pub(crate) fn drive_bytes<C: DigestCore>(digest: &mut Digest, data: &[u8]) {
    digest.reset();
    let mut core = C::default();
    core.absorb(data);
    core.finish(digest);
}

/// Run `C` over a stream, reading `buffer_size` bytes at a time
pub(crate) fn drive_stream<C, S>(
    digest: &mut Digest,
    source: &mut S,
    buffer_size: usize,
    algorithm: &str,
) where
    C: DigestCore,
    S: Read + Seek + ?Sized,
{
    digest.reset();
    let mut core = C::default();
    let mut buffer = vec![0u8; buffer_size.max(MIN_BUFFER_SIZE)];
    let mut consumed: u64 = 0;

    let outcome = loop {
        match source.read(&mut buffer) {
            Ok(0) => break Ok(()),
            Ok(n) => {
                core.absorb(&buffer[..n]);
                consumed += n as u64;
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => break Err(e),
        }
    };

    match outcome {
        Ok(()) => {
            core.finish(digest);
            log::debug!("{algorithm}: hashed {consumed} bytes from stream");
        }
        Err(e) => {
            log::warn!(
                "{algorithm}: stream read failed after {consumed} bytes, returning zero digest: {e}"
            );
        }
    }

    rewind_quietly(source);
}
