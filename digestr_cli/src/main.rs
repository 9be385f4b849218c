use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use std::path::PathBuf;

use digestr_cli::config::{AppConfig, ConfigManager};
use digestr_cli::error::CliError;
use digestr_cli::output::{FileReport, OutputFormat, create_formatter};
use digestr_cli::terminal;
use digestr_core::{HashAlgorithm, HashCalculator};

const CREDITS: &str = "\
digestr - message digest calculator

Computes Adler-32, CRC-32, ELF, MD5 and SHA-256 digests of files.

Based on the Gash hashing tool by Gary Hammock (2008-2014).
MD5 follows RFC 1321; SHA-256 follows FIPS 180-2.

Released under the MIT License.
";

#[derive(Parser)]
#[command(name = "digestr")]
#[command(author, version, about = "Digestr - Message digest calculator", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Use this configuration file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate digest(s) of a file
    Hash {
        /// File to hash
        path: PathBuf,

        /// Hash algorithm to use (defaults to hash.default_algorithm)
        #[arg(short, long, value_enum)]
        algorithm: Option<HashAlgorithmArg>,

        /// Output format (defaults to output.default_format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show authorship and licence information
    Credits,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g., hash.default_algorithm)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., hash.buffer_size)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration values
    List,

    /// Print the configuration file path
    Path,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum HashAlgorithmArg {
    Md5,
    #[value(alias = "sha-256")]
    Sha256,
    #[value(aliases = ["crc", "crc-32"])]
    Crc32,
    #[value(alias = "elfhash")]
    Elf,
    #[value(aliases = ["adler", "adler-32"])]
    Adler32,
    All,
}

impl From<HashAlgorithmArg> for Vec<HashAlgorithm> {
    fn from(arg: HashAlgorithmArg) -> Self {
        match arg {
            HashAlgorithmArg::Md5 => vec![HashAlgorithm::MD5],
            HashAlgorithmArg::Sha256 => vec![HashAlgorithm::SHA256],
            HashAlgorithmArg::Crc32 => vec![HashAlgorithm::CRC32],
            HashAlgorithmArg::Elf => vec![HashAlgorithm::ELF],
            HashAlgorithmArg::Adler32 => vec![HashAlgorithm::ADLER32],
            HashAlgorithmArg::All => HashAlgorithm::ALL.to_vec(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging based on debug flag
    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("digestr_core", log::LevelFilter::Debug)
            .filter_module("digestr_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    // Until the configuration is loaded, only the environment decides
    colored::control::set_override(terminal::use_color(true));

    let debug = cli.debug;
    if let Err(error) = run(cli) {
        let error = CliError::from(error);
        eprint!("{}", error.format_for_user(debug));
        std::process::exit(error.exit_code() as i32);
    }
}

fn run(cli: Cli) -> Result<()> {
    let manager = match cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };

    match cli.command {
        Commands::Hash {
            path,
            algorithm,
            format,
        } => {
            let config = manager.load()?;
            colored::control::set_override(terminal::use_color(config.output.color_enabled));
            hash_command(&config, path, algorithm, format)
        }
        Commands::Credits => {
            print!("{CREDITS}");
            Ok(())
        }
        Commands::Config { command } => config_command(manager, command),
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    }
}

fn hash_command(
    config: &AppConfig,
    path: PathBuf,
    algorithm: Option<HashAlgorithmArg>,
    format: Option<OutputFormat>,
) -> Result<()> {
    let algorithms: Vec<HashAlgorithm> = match algorithm {
        Some(arg) => arg.into(),
        None => vec![config.default_algorithm()?],
    };
    let format = match format {
        Some(format) => format,
        None => config.default_format()?,
    };

    log::debug!(
        "Hashing {} with {:?} (buffer size {})",
        path.display(),
        algorithms,
        config.hash.buffer_size
    );

    let calculator = HashCalculator::with_buffer_size(config.hash.buffer_size);
    let results = calculator.calculate_multiple(&path, &algorithms)?;

    for failed in results.iter().filter(|r| r.read_failed) {
        log::warn!(
            "Could not read {}; reporting a zero {} digest",
            path.display(),
            failed.algorithm.display_name()
        );
    }

    let report = FileReport::new(path, results);
    let use_color = terminal::use_color(config.output.color_enabled);
    let formatter = create_formatter(format, use_color, config.output.show_file_name);
    print!("{}", formatter.format(&report)?);

    Ok(())
}

fn config_command(mut manager: ConfigManager, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Get { key } => {
            let value = manager.get(&key)?;
            println!("{value}");
        }
        ConfigCommand::Set { key, value } => {
            manager.set(&key, &value)?;
            eprintln!("{}", format!("Set {key} = {value}").green());
            eprintln!(
                "Configuration saved to: {}",
                manager.get_config_path().display()
            );
        }
        ConfigCommand::List => {
            let items = manager.list().context("Failed to list configuration")?;
            eprintln!("Config file: {}", manager.get_config_path().display());

            let mut current_section = "";
            for (key, value) in &items {
                let (section, name) = key.split_once('.').unwrap_or(("general", key.as_str()));
                if section != current_section {
                    println!("[{}]", section.yellow());
                    current_section = section;
                }
                println!("  {} = {}", name.cyan(), value);
            }
        }
        ConfigCommand::Path => {
            println!("{}", manager.get_config_path().display());
        }
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
