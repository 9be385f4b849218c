//! Mock readers for exercising stream hashing

use std::io::{self, Cursor, Read, Seek, SeekFrom};

/// Seekable reader that fails once `fail_after` bytes have been read.
///
/// Seeking works normally, so callers can check that the stream is
/// rewound after the failure.
#[derive(Debug)]
pub struct FailingReader {
    inner: Cursor<Vec<u8>>,
    fail_after: u64,
    read_calls: usize,
    failures: usize,
    /// Stop failing after the first error
    recovers: bool,
}

impl FailingReader {
    /// Serve `content` but fail when reading past `fail_after` bytes
    pub fn new(content: Vec<u8>, fail_after: u64) -> Self {
        Self {
            inner: Cursor::new(content),
            fail_after,
            read_calls: 0,
            failures: 0,
            recovers: false,
        }
    }

    /// Reader whose very first read fails
    pub fn immediately() -> Self {
        Self::new(vec![0xAB; 256], 0)
    }

    /// Reader whose first read fails and which serves `content` normally
    /// from then on
    pub fn fail_once(content: Vec<u8>) -> Self {
        Self {
            recovers: true,
            ..Self::new(content, 0)
        }
    }

    /// Number of reads that returned an error
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Current position of the underlying cursor
    pub fn position(&self) -> u64 {
        self.inner.position()
    }

    /// Number of `read` calls seen, including the failing one
    pub fn read_calls(&self) -> usize {
        self.read_calls
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.read_calls += 1;
        if self.recovers && self.failures > 0 {
            return self.inner.read(buf);
        }

        let position = self.inner.position();
        if position >= self.fail_after {
            self.failures += 1;
            return Err(io::Error::other("simulated read failure"));
        }

        let allowed = (self.fail_after - position).min(buf.len() as u64) as usize;
        self.inner.read(&mut buf[..allowed])
    }
}

impl Seek for FailingReader {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

/// Seekable reader that returns at most `max_chunk` bytes per read
#[derive(Debug)]
pub struct ShortReader {
    inner: Cursor<Vec<u8>>,
    max_chunk: usize,
}

impl ShortReader {
    pub fn new(content: Vec<u8>, max_chunk: usize) -> Self {
        Self {
            inner: Cursor::new(content),
            max_chunk: max_chunk.max(1),
        }
    }

    pub fn position(&self) -> u64 {
        self.inner.position()
    }
}

impl Read for ShortReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let limit = buf.len().min(self.max_chunk);
        self.inner.read(&mut buf[..limit])
    }
}

impl Seek for ShortReader {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failing_reader_fails_after_limit() {
        let mut reader = FailingReader::new(vec![1; 100], 40);
        let mut buf = [0u8; 64];

        assert_eq!(reader.read(&mut buf).unwrap(), 40);
        assert!(reader.read(&mut buf).is_err());
        assert_eq!(reader.read_calls(), 2);

        reader.seek(SeekFrom::Start(0)).unwrap();
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_fail_once_recovers() {
        let mut reader = FailingReader::fail_once(b"abc".to_vec());
        let mut buf = [0u8; 8];

        assert!(reader.read(&mut buf).is_err());
        assert_eq!(reader.read(&mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], b"abc");
        assert_eq!(reader.read(&mut buf).unwrap(), 0);
        assert_eq!(reader.failures(), 1);
    }

    #[test]
    fn test_short_reader_limits_chunks() {
        let mut reader = ShortReader::new(vec![7; 10], 3);
        let mut buf = [0u8; 8];

        assert_eq!(reader.read(&mut buf).unwrap(), 3);
        let mut rest = Vec::new();
        reader.read_to_end(&mut rest).unwrap();
        assert_eq!(rest.len(), 7);
    }
}
