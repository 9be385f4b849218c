//! Validation related error types

use thiserror::Error;

/// Rejected user-supplied values
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Algorithm name not recognised
    #[error("Unknown hash algorithm: {name}")]
    UnknownAlgorithm { name: String },
}

impl ValidationError {
    /// Create an unknown algorithm error
    pub fn unknown_algorithm(name: &str) -> Self {
        Self::UnknownAlgorithm {
            name: name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_algorithm() {
        let error = ValidationError::unknown_algorithm("sha3");
        assert_eq!(error.to_string(), "Unknown hash algorithm: sha3");
    }
}
