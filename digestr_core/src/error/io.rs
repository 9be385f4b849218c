//! Errors raised while opening input files

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to open or inspect an input
#[derive(Error, Debug)]
#[error("{}", self.message())]
pub struct IoError {
    pub kind: IoErrorKind,
    /// Offending path, when known
    pub path: Option<PathBuf>,
    #[source]
    pub source: Option<io::Error>,
}

/// What went wrong with the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoErrorKind {
    FileNotFound,
    PermissionDenied,
    /// Path exists but is not a regular file
    NotAFile,
    Other,
}

impl From<io::ErrorKind> for IoErrorKind {
    fn from(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::NotFound => Self::FileNotFound,
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            io::ErrorKind::IsADirectory => Self::NotAFile,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for IoErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FileNotFound => "File not found",
            Self::PermissionDenied => "Permission denied for file",
            Self::NotAFile => "Not a regular file",
            Self::Other => "I/O error",
        })
    }
}

impl IoError {
    /// Error of `kind` about `path`, with no underlying cause
    pub fn new(kind: IoErrorKind, path: &Path) -> Self {
        Self {
            kind,
            path: Some(path.to_path_buf()),
            source: None,
        }
    }

    /// Attach the path the failed operation was about
    pub fn with_path(mut self, path: &Path) -> Self {
        self.path = Some(path.to_path_buf());
        self
    }

    fn message(&self) -> String {
        let mut message = self.kind.to_string();
        if let Some(path) = &self.path {
            message.push_str(&format!(": {}", path.display()));
        }
        // The kind alone says nothing useful for uncategorised failures
        if self.kind == IoErrorKind::Other
            && let Some(source) = &self.source
        {
            message.push_str(&format!(" ({source})"));
        }
        message
    }
}

impl From<io::Error> for IoError {
    fn from(source: io::Error) -> Self {
        Self {
            kind: source.kind().into(),
            path: None,
            source: Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_follows_std_error() {
        let cases = [
            (io::ErrorKind::NotFound, IoErrorKind::FileNotFound),
            (io::ErrorKind::PermissionDenied, IoErrorKind::PermissionDenied),
            (io::ErrorKind::IsADirectory, IoErrorKind::NotAFile),
            (io::ErrorKind::UnexpectedEof, IoErrorKind::Other),
        ];

        for (std_kind, expected) in cases {
            let error = IoError::from(io::Error::new(std_kind, "boom"));
            assert_eq!(error.kind, expected, "{std_kind:?}");
            assert!(error.source.is_some());
            assert!(error.path.is_none());
        }
    }

    #[test]
    fn test_message_names_the_path() {
        let error = IoError::new(IoErrorKind::NotAFile, Path::new("/tmp"));
        assert_eq!(error.to_string(), "Not a regular file: /tmp");

        let denied = IoError::from(io::Error::new(io::ErrorKind::PermissionDenied, "nope"))
            .with_path(Path::new("/root/secret.bin"));
        assert_eq!(
            denied.to_string(),
            "Permission denied for file: /root/secret.bin"
        );
    }

    #[test]
    fn test_other_errors_include_cause() {
        let error =
            IoError::from(io::Error::other("disk on fire")).with_path(Path::new("/data.bin"));

        assert_eq!(error.kind, IoErrorKind::Other);
        assert_eq!(error.to_string(), "I/O error: /data.bin (disk on fire)");
    }

    #[test]
    fn test_missing_path_without_source() {
        let error = IoError::new(IoErrorKind::FileNotFound, Path::new("gone.bin"));
        assert!(error.source.is_none());
        assert_eq!(error.to_string(), "File not found: gone.bin");
    }
}
