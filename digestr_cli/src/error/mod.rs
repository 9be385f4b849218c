use colored::*;
use digestr_core::HashAlgorithm;
use digestr_core::error::{IoErrorKind, ValidationError};
use std::error::Error as StdError;
use std::fmt;

use crate::config::ConfigError;

/// CLI-specific error type with semantic exit codes
#[derive(Debug)]
pub struct CliError {
    /// The main error message
    message: String,

    /// Error category for exit code determination
    category: ErrorCategory,

    /// Additional context information
    context: Vec<(String, String)>,

    /// Suggestions for recovery
    pub suggestions: Vec<String>,

    /// Source error if any
    source: Option<Box<dyn StdError + Send + Sync>>,
}

/// Error categories that map to exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorCategory {
    General,
    Misuse,
    Filesystem,
}

/// Semantic exit codes for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    GeneralError = 1,
    Misuse = 2,
    FilesystemError = 4,
}

/// Extension trait for adding context to errors
pub trait ErrorContext {
    fn with_context(self, key: &str, value: &str) -> Self;
    fn with_suggestion(self, suggestion: &str) -> Self;
    fn with_source(self, source: Box<dyn StdError + Send + Sync>) -> Self;
}

impl CliError {
    fn new(message: &str, category: ErrorCategory) -> Self {
        Self {
            message: message.to_string(),
            category,
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    /// Create a general error
    pub fn general(message: &str) -> Self {
        Self::new(message, ErrorCategory::General)
    }

    /// Create a command misuse error
    pub fn misuse(message: &str) -> Self {
        let mut error = Self::new(message, ErrorCategory::Misuse);
        error
            .suggestions
            .push("Run 'digestr --help' for usage information".to_string());
        error
    }

    /// Create a filesystem error
    pub fn filesystem(message: &str) -> Self {
        let mut error = Self::new(message, ErrorCategory::Filesystem);

        let lower = message.to_lowercase();
        if lower.contains("not found") {
            error
                .suggestions
                .push("Check if the file exists".to_string());
            error
                .suggestions
                .push("Verify you have the correct path".to_string());
        } else if lower.contains("permission") || lower.contains("denied") {
            error.suggestions.push("Check file permissions".to_string());
        } else if lower.contains("not a regular file") {
            error
                .suggestions
                .push("Pass a file, not a directory".to_string());
        }

        error
    }

    /// Convert a command failure, recognising the typed errors it may wrap
    pub fn from_anyhow(error: anyhow::Error) -> Self {
        let error = match error.downcast::<CliError>() {
            Ok(cli_error) => return cli_error,
            Err(error) => error,
        };
        let error = match error.downcast::<digestr_core::Error>() {
            Ok(core_error) => return Self::from(core_error),
            Err(error) => error,
        };

        if let Some(config_error) = error.downcast_ref::<ConfigError>() {
            let mut cli_error = Self::misuse(&config_error.to_string());
            if let ConfigError::UnknownKey { key } = config_error
                && let Some(known) = closest_match(key, &crate::config::KNOWN_KEYS)
            {
                cli_error
                    .suggestions
                    .insert(0, format!("Did you mean '{known}'?"));
            }
            return cli_error;
        }

        // Keep the context chain readable in a single line
        Self::general(&format!("{error:#}"))
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self.category {
            ErrorCategory::General => ExitCode::GeneralError,
            ErrorCategory::Misuse => ExitCode::Misuse,
            ErrorCategory::Filesystem => ExitCode::FilesystemError,
        }
    }

    fn label(&self) -> &'static str {
        match self.category {
            ErrorCategory::General => "Error",
            ErrorCategory::Misuse => "Usage Error",
            ErrorCategory::Filesystem => "File Error",
        }
    }

    /// Format the error for user display
    pub fn format_for_user(&self, debug: bool) -> String {
        let mut output = String::new();

        let prefix = match self.category {
            ErrorCategory::Misuse => self.label().yellow(),
            _ => self.label().red(),
        };
        output.push_str(&format!("{}: {}\n", prefix, self.message));

        if !self.context.is_empty() {
            output.push_str("\nContext:\n");
            for (key, value) in &self.context {
                output.push_str(&format!("  {}: {}\n", key.bold(), value));
            }
        }

        // Error chain in debug mode
        if debug && let Some(source) = &self.source {
            output.push_str("\nCaused by:\n");
            let mut current: Option<&dyn StdError> = Some(source.as_ref());
            let mut level = 1;

            while let Some(err) = current {
                output.push_str(&format!("  {level}: {err}\n"));
                current = err.source();
                level += 1;
            }
        }

        if !self.suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for suggestion in &self.suggestions {
                output.push_str(&format!("  • {suggestion}\n"));
            }
        }

        output
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label(), self.message)?;

        for (key, value) in &self.context {
            write!(f, " ({key}: {value})")?;
        }

        Ok(())
    }
}

impl StdError for CliError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl ErrorContext for CliError {
    fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.push((key.to_string(), value.to_string()));
        self
    }

    fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestions.push(suggestion.to_string());
        self
    }

    fn with_source(mut self, source: Box<dyn StdError + Send + Sync>) -> Self {
        self.source = Some(source);
        self
    }
}

impl From<anyhow::Error> for CliError {
    fn from(error: anyhow::Error) -> Self {
        Self::from_anyhow(error)
    }
}

/// Core I/O errors are filesystem failures; validation errors are misuse
impl From<digestr_core::Error> for CliError {
    fn from(error: digestr_core::Error) -> Self {
        match error {
            digestr_core::Error::Io(io_error) => {
                let mut cli_error = match io_error.kind {
                    IoErrorKind::Other => Self::general(&io_error.to_string()),
                    _ => Self::filesystem(&io_error.to_string()),
                };
                if let Some(path) = &io_error.path {
                    cli_error = cli_error.with_context("path", &path.display().to_string());
                }
                cli_error.with_source(Box::new(io_error))
            }
            digestr_core::Error::Validation(ValidationError::UnknownAlgorithm { name }) => {
                let supported = HashAlgorithm::ALL.map(|a| a.to_string()).join(", ");
                let mut cli_error = Self::misuse(&format!("Unknown hash algorithm: {name}"));
                cli_error
                    .suggestions
                    .insert(0, format!("Supported algorithms: {supported}"));
                cli_error
            }
        }
    }
}

/// Closest candidate within edit distance 2, if any
fn closest_match<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|&candidate| (levenshtein_distance(input, candidate), candidate))
        .filter(|&(distance, _)| distance <= 2)
        .min_by_key(|&(distance, _)| distance)
        .map(|(_, candidate)| candidate)
}

/// Simple Levenshtein distance for configuration key suggestions
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let len1 = s1_chars.len();
    let len2 = s2_chars.len();
    let mut matrix = vec![vec![0; len2 + 1]; len1 + 1];

    for (i, row) in matrix.iter_mut().enumerate().take(len1 + 1) {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate().take(len2 + 1) {
        *cell = j;
    }

    for (i, c1) in s1_chars.iter().enumerate() {
        let i1 = i + 1;
        for (j, c2) in s2_chars.iter().enumerate() {
            let j1 = j + 1;
            let cost = if c1 == c2 { 0 } else { 1 };
            matrix[i1][j1] = std::cmp::min(
                std::cmp::min(matrix[i][j1] + 1, matrix[i1][j] + 1),
                matrix[i][j] + cost,
            );
        }
    }

    matrix[len1][len2]
}
