use anyhow::{Context, Result};
use digestr_core::HashAlgorithm;
use digestr_core::hashing::{DEFAULT_BUFFER_SIZE, MIN_BUFFER_SIZE};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// Keys accepted by `config get` / `config set`
pub const KNOWN_KEYS: [&str; 5] = [
    "hash.default_algorithm",
    "hash.buffer_size",
    "output.show_file_name",
    "output.color_enabled",
    "output.default_format",
];

/// Rejected configuration value
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown configuration key: {key}")]
    UnknownKey { key: String },

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

impl ConfigError {
    fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub hash: HashConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct HashConfig {
    /// Algorithm used when `--algorithm` is not given
    pub default_algorithm: String,
    /// Read buffer size for file hashing, in bytes
    pub buffer_size: usize,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct OutputConfig {
    /// Print a `File: <path>` line before text output
    pub show_file_name: bool,
    pub color_enabled: bool,
    pub default_format: String,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            default_algorithm: HashAlgorithm::MD5.to_string(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_file_name: true,
            color_enabled: true,
            default_format: "text".to_string(),
        }
    }
}

impl AppConfig {
    /// Check every value that the type system alone does not constrain
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_algorithm(&self.hash.default_algorithm)?;
        validate_buffer_size(self.hash.buffer_size)?;
        validate_format(&self.output.default_format)?;
        Ok(())
    }

    /// Algorithm to use when none is given on the command line
    pub fn default_algorithm(&self) -> Result<HashAlgorithm> {
        self.hash
            .default_algorithm
            .parse()
            .context("Invalid hash.default_algorithm")
    }

    /// Output format to use when none is given on the command line
    pub fn default_format(&self) -> Result<OutputFormat> {
        OutputFormat::from_string(&self.output.default_format)
    }
}

fn validate_algorithm(value: &str) -> Result<(), ConfigError> {
    value
        .parse::<HashAlgorithm>()
        .map(|_| ())
        .map_err(|e| ConfigError::invalid("hash.default_algorithm", e.to_string()))
}

fn validate_buffer_size(size: usize) -> Result<(), ConfigError> {
    if size < MIN_BUFFER_SIZE {
        return Err(ConfigError::invalid(
            "hash.buffer_size",
            format!("must be at least {MIN_BUFFER_SIZE} bytes"),
        ));
    }
    Ok(())
}

fn validate_format(value: &str) -> Result<(), ConfigError> {
    OutputFormat::from_string(value)
        .map(|_| ())
        .map_err(|e| ConfigError::invalid("output.default_format", e.to_string()))
}

/// Configuration manager that handles XDG-compliant paths and layered configuration
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Create a new ConfigManager with default XDG-compliant paths
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a ConfigManager with a specific path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn get_config_path(&self) -> &Path {
        &self.config_path
    }

    /// Get the default XDG-compliant configuration path
    fn default_config_path() -> PathBuf {
        #[cfg(not(target_os = "windows"))]
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("digestr/config.toml");
        }

        #[cfg(target_os = "linux")]
        {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config/digestr/config.toml")
        }

        #[cfg(not(target_os = "linux"))]
        {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("digestr")
                .join("config.toml")
        }
    }

    /// Load configuration with layered priority: ENV > File > Defaults
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new();

        // Layer 1: Defaults
        figment = figment.merge(Serialized::defaults(AppConfig::default()));

        // Layer 2: Config file (if exists)
        if self.config_path.exists() {
            figment = figment.merge(Toml::file(&self.config_path));
        }

        // Layer 3: Environment variables
        figment = figment.merge(Env::prefixed("DIGESTR_").split("__"));

        let config: AppConfig = figment
            .extract()
            .context("Failed to load configuration")?;
        config.validate()?;

        log::debug!("Loaded configuration from {}", self.config_path.display());
        Ok(config)
    }

    /// Get a configuration value by key (dot notation)
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.load()?;
        let toml_string = toml::to_string(&config)?;
        let value: toml::Value = toml::from_str(&toml_string)?;

        let mut current = &value;
        for part in key.split('.') {
            match current {
                toml::Value::Table(table) => {
                    current = table.get(part).ok_or_else(|| ConfigError::UnknownKey {
                        key: key.to_string(),
                    })?;
                }
                _ => anyhow::bail!("Invalid key path: {}", key),
            }
        }

        match current {
            toml::Value::String(s) => Ok(s.clone()),
            toml::Value::Integer(i) => Ok(i.to_string()),
            toml::Value::Boolean(b) => Ok(b.to_string()),
            _ => anyhow::bail!("Value at '{}' is not a simple type", key),
        }
    }

    /// Set a configuration value by key (dot notation) and write the file
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parsed_value = Self::parse_config_value(key, value)?;

        let mut config = if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path).with_context(|| {
                format!("Failed to read {}", self.config_path.display())
            })?;
            toml::from_str(&content)?
        } else {
            toml::Value::Table(toml::map::Map::new())
        };

        // KNOWN_KEYS are all `section.name`
        let Some((section, name)) = key.split_once('.') else {
            anyhow::bail!("Invalid key path: {}", key);
        };

        let toml::Value::Table(root) = &mut config else {
            anyhow::bail!("Configuration file is not a TOML table");
        };
        let section_value = root
            .entry(section.to_string())
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
        let toml::Value::Table(table) = section_value else {
            anyhow::bail!("Invalid key path: expected table at '{}'", section);
        };
        table.insert(name.to_string(), parsed_value);

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(&config)?;
        fs::write(&self.config_path, toml_string)
            .with_context(|| format!("Failed to write {}", self.config_path.display()))?;

        log::debug!("Set {key} = {value} in {}", self.config_path.display());
        Ok(())
    }

    /// List all effective configuration values
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let config = self.load()?;
        let toml_string = toml::to_string(&config)?;
        let value: toml::Value = toml::from_str(&toml_string)?;

        let mut items = Vec::new();
        Self::collect_values(&value, String::new(), &mut items);
        items.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(items)
    }

    /// Recursively collect all key-value pairs from TOML
    fn collect_values(value: &toml::Value, prefix: String, items: &mut Vec<(String, String)>) {
        match value {
            toml::Value::Table(table) => {
                for (key, val) in table {
                    let new_prefix = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    Self::collect_values(val, new_prefix, items);
                }
            }
            toml::Value::String(s) => items.push((prefix, s.clone())),
            toml::Value::Integer(i) => items.push((prefix, i.to_string())),
            toml::Value::Boolean(b) => items.push((prefix, b.to_string())),
            _ => {}
        }
    }

    /// Validate `value` for `key` and convert it to its TOML type
    fn parse_config_value(key: &str, value: &str) -> Result<toml::Value, ConfigError> {
        match key {
            "hash.default_algorithm" => {
                validate_algorithm(value)?;
                Ok(toml::Value::String(value.to_lowercase()))
            }
            "hash.buffer_size" => {
                let size: usize = value
                    .parse()
                    .map_err(|_| ConfigError::invalid(key, "must be a positive integer"))?;
                validate_buffer_size(size)?;
                i64::try_from(size)
                    .map(toml::Value::Integer)
                    .map_err(|_| ConfigError::invalid(key, "value too large"))
            }
            "output.show_file_name" | "output.color_enabled" => value
                .parse::<bool>()
                .map(toml::Value::Boolean)
                .map_err(|_| ConfigError::invalid(key, "must be 'true' or 'false'")),
            "output.default_format" => {
                validate_format(value)?;
                Ok(toml::Value::String(value.to_lowercase()))
            }
            _ => Err(ConfigError::UnknownKey {
                key: key.to_string(),
            }),
        }
    }
}
