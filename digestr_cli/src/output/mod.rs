mod formatters;

pub use formatters::{CsvFormatter, JsonFormatter, TextFormatter};

use anyhow::Result;
use digestr_core::HashResult;
use std::path::PathBuf;

/// Output format enumeration
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn from_string(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => anyhow::bail!("Unknown output format: {}", s),
        }
    }
}

/// Every digest computed for one file
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub size: u64,
    pub results: Vec<HashResult>,
}

impl FileReport {
    pub fn new(path: PathBuf, results: Vec<HashResult>) -> Self {
        let size = results
            .iter()
            .find(|r| !r.read_failed)
            .map_or(0, |r| r.input_size);
        Self {
            path,
            size,
            results,
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render the report, including any trailing newline
    fn format(&self, report: &FileReport) -> Result<String>;
}

/// Create a formatter based on output format
pub fn create_formatter(
    format: OutputFormat,
    use_color: bool,
    show_file_name: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_color, show_file_name)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Csv => Box::new(CsvFormatter::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use digestr_core::{HashAlgorithm, HashCalculator};

    #[test]
    fn test_report_size_skips_failed_reads() {
        let calculator = HashCalculator::new();
        let mut failed = calculator.calculate_str(HashAlgorithm::MD5, "");
        failed.read_failed = true;
        let hashed = calculator.calculate_str(HashAlgorithm::CRC32, "abc");

        let report = FileReport::new(PathBuf::from("abc.txt"), vec![failed, hashed]);
        assert_eq!(report.size, 3);
    }

    #[test]
    fn test_format_names() {
        assert_eq!(OutputFormat::from_string("JSON").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_string("xml").is_err());
    }
}
