use super::{FileReport, OutputFormatter};
use anyhow::Result;
use colored::*;
use serde_json::{Map, Value, json};

/// Text formatter for human-readable output
pub struct TextFormatter {
    use_color: bool,
    show_file_name: bool,
}

impl TextFormatter {
    pub fn new(use_color: bool, show_file_name: bool) -> Self {
        Self {
            use_color,
            show_file_name,
        }
    }

    fn colorize(&self, text: &str, color: fn(&str) -> ColoredString) -> String {
        if self.use_color {
            color(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &FileReport) -> Result<String> {
        let mut output = String::new();

        if self.show_file_name {
            output.push_str(&format!("File: {}\n", report.path.display()));
        }

        for result in &report.results {
            let label = self.colorize(result.algorithm.display_name(), |s| s.yellow());
            let hash = self.colorize(&result.hash, |s| s.cyan());
            output.push_str(&format!("{label}: {hash}\n"));
        }

        Ok(output)
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &FileReport) -> Result<String> {
        let mut hashes = Map::new();
        for result in &report.results {
            hashes.insert(
                result.algorithm.display_name().to_string(),
                json!(result.hash),
            );
        }

        let json_result = json!({
            "file": report.path.to_string_lossy(),
            "size": report.size,
            "hashes": Value::Object(hashes),
        });

        let mut rendered = if self.pretty {
            serde_json::to_string_pretty(&json_result)?
        } else {
            serde_json::to_string(&json_result)?
        };
        rendered.push('\n');
        Ok(rendered)
    }
}

/// CSV formatter for tabular output
#[derive(Default)]
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn new() -> Self {
        Self
    }

    fn get_headers() -> [&'static str; 4] {
        ["file", "algorithm", "hash", "size"]
    }
}

impl OutputFormatter for CsvFormatter {
    fn format(&self, report: &FileReport) -> Result<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.write_record(Self::get_headers())?;

        let file = report.path.to_string_lossy();
        let size = report.size.to_string();
        for result in &report.results {
            let algorithm = result.algorithm.to_string();
            wtr.write_record([&*file, algorithm.as_str(), result.hash.as_str(), size.as_str()])?;
        }

        let data = wtr.into_inner()?;
        Ok(String::from_utf8(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use digestr_core::{HashAlgorithm, HashCalculator};
    use std::path::PathBuf;

    fn report(path: &str, algorithms: &[HashAlgorithm]) -> FileReport {
        let calculator = HashCalculator::new();
        let results = algorithms
            .iter()
            .map(|&a| calculator.calculate_str(a, "abc"))
            .collect();
        FileReport::new(PathBuf::from(path), results)
    }

    #[test]
    fn test_text_output() {
        let report = report("abc.txt", &[HashAlgorithm::MD5, HashAlgorithm::CRC32]);
        let text = TextFormatter::new(false, true).format(&report).unwrap();

        assert_eq!(
            text,
            "File: abc.txt\nMD5: 900150983cd24fb0d6963f7d28e17f72\nCRC-32: 352441c2\n"
        );
    }

    #[test]
    fn test_text_output_without_file_name() {
        let report = report("abc.txt", &[HashAlgorithm::ADLER32]);
        let text = TextFormatter::new(false, false).format(&report).unwrap();
        assert_eq!(text, "Adler-32: 024d0127\n");
    }

    #[test]
    fn test_json_output() {
        let report = report("abc.txt", &[HashAlgorithm::SHA256, HashAlgorithm::ELF]);
        let rendered = JsonFormatter::new(false).format(&report).unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["file"], "abc.txt");
        assert_eq!(value["size"], 3);
        assert_eq!(value["hashes"]["ELF"], "00006783");
        assert_eq!(
            value["hashes"]["SHA-256"],
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_csv_output_quotes_paths() {
        let report = report("a,b.txt", &[HashAlgorithm::CRC32]);
        let rendered = CsvFormatter::new().format(&report).unwrap();

        let mut lines = rendered.lines();
        assert_eq!(lines.next(), Some("file,algorithm,hash,size"));
        assert_eq!(lines.next(), Some("\"a,b.txt\",crc32,352441c2,3"));
        assert_eq!(lines.next(), None);
    }
}
