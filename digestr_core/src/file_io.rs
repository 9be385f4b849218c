//! Byte sources for stream hashing
//!
//! Opening a path produces a buffered, seekable reader; failures carry the
//! path so callers can report them without extra context.

use crate::Result;
use crate::error::{IoError, IoErrorKind};
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Open `path` for binary reading.
///
/// Directories are rejected with [`IoErrorKind::NotAFile`]
/// up front, since some platforms allow opening them and only fail on the
/// first read.
pub fn open_source(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| IoError::from(e).with_path(path))?;

    let metadata = file
        .metadata()
        .map_err(|e| IoError::from(e).with_path(path))?;
    if metadata.is_dir() {
        return Err(IoError::new(IoErrorKind::NotAFile, path).into());
    }

    log::debug!("Opened {} ({} bytes)", path.display(), metadata.len());
    Ok(BufReader::new(file))
}

/// Seek `source` back to offset 0, ignoring failure
pub fn rewind_quietly<S: Seek + ?Sized>(source: &mut S) {
    if let Err(e) = source.seek(SeekFrom::Start(0)) {
        log::debug!("Failed to rewind stream: {e}");
    }
}

/// Reader adapter that counts the bytes passed through it and remembers
/// whether any read failed
#[derive(Debug)]
pub(crate) struct CountingReader<'a, S: ?Sized> {
    inner: &'a mut S,
    count: u64,
    failed: bool,
}

impl<'a, S: ?Sized> CountingReader<'a, S> {
    pub(crate) fn new(inner: &'a mut S) -> Self {
        Self {
            inner,
            count: 0,
            failed: false,
        }
    }

    pub(crate) fn count(&self) -> u64 {
        self.count
    }

    /// Whether a read returned an error other than `Interrupted`
    pub(crate) fn failed(&self) -> bool {
        self.failed
    }
}

impl<S: Read + ?Sized> Read for CountingReader<'_, S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.inner.read(buf) {
            Ok(n) => {
                self.count += n as u64;
                Ok(n)
            }
            Err(e) => {
                if e.kind() != io::ErrorKind::Interrupted {
                    self.failed = true;
                }
                Err(e)
            }
        }
    }
}

impl<S: Seek + ?Sized> Seek for CountingReader<'_, S> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}
