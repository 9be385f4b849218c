//! Error types for the Digestr Core Library
//!
//! The digest engine itself never fails: every algorithm is defined for
//! every byte sequence and an unreadable stream yields the zero digest.
//! Errors only arise around it, when opening files or parsing algorithm
//! names.

use thiserror::Error;

pub mod io;
pub mod validation;

pub use self::io::{IoError, IoErrorKind};
pub use self::validation::ValidationError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Digestr Core Library
///
/// - I/O errors: opening or inspecting input files
/// - Validation errors: unknown algorithm names
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error(transparent)]
    Io(#[from] IoError),

    /// Validation related errors
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::from(source))
    }
}

impl Error {
    /// Whether this error came from the filesystem
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;
    use std::io;
    use std::path::Path;

    #[test]
    fn test_file_not_found_error_creation() {
        let path = Path::new("/non/existent/file.bin");
        let error = Error::Io(IoError::new(IoErrorKind::FileNotFound, path));

        match error {
            Error::Io(io_err) => {
                assert_eq!(io_err.kind, IoErrorKind::FileNotFound);
                assert_eq!(io_err.path, Some(path.to_path_buf()));
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_unknown_algorithm_error() {
        let error = Error::Validation(ValidationError::unknown_algorithm("whirlpool"));

        assert!(matches!(
            error,
            Error::Validation(ValidationError::UnknownAlgorithm { .. })
        ));
        assert!(error.to_string().contains("whirlpool"));
        assert!(!error.is_io());
    }

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();

        match error {
            Error::Io(ref io_err) => {
                assert_eq!(io_err.kind, IoErrorKind::FileNotFound);
            }
            _ => panic!("Expected Io error"),
        }
        assert!(error.is_io());
    }

    #[test]
    fn test_error_source_chain() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "Access denied");
        let path = Path::new("/test/file.bin");
        let error = Error::Io(IoError::from(io_error).with_path(path));

        assert!(error.source().is_some());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_file_errors_include_path_context() {
        let path = std::path::PathBuf::from("/very/long/path/to/release [2014] image.iso");

        let error = Error::Io(IoError::new(IoErrorKind::FileNotFound, &path));
        assert!(error.to_string().contains("release [2014] image.iso"));

        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "Access denied");
        let error = Error::Io(IoError::from(io_error).with_path(&path));
        assert!(error.to_string().contains("release [2014] image.iso"));
    }
}
