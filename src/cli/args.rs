//! Command-line argument definitions for the 1000 Days report processor
//!
//! This module defines the complete CLI interface using the clap derive
//! API: the `process` command that runs a message log through the parser,
//! and the `schemas` command that lists the registered report types.

use crate::config::{Config, default_workers};
use crate::constants::{DEFAULT_BATCH_SIZE, MAX_PARALLEL_WORKERS, REPORT_CODES};
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the 1000 Days report processor
///
/// Decodes free-form SMS text reports from community health workers into
/// typed, validated records and routes them to a storage sink.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "thousanddays-processor",
    version,
    about = "Decode and validate 1000 Days community health SMS reports",
    long_about = "Processes a log of SMS text reports from community health workers against \
                  per-report-type schemas. Each message is validated field by field in a \
                  single error-tolerant pass, so every malformed field is surfaced at once; \
                  valid reports are stored as typed records, failures as audit rows."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the report processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Process a message log into typed records (main command)
    Process(ProcessArgs),
    /// List the registered report types and their field schemas
    Schemas(SchemasArgs),
}

/// Arguments for the process command (main batch processing)
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Input path to the message log CSV file
    ///
    /// The file must carry an `id,date,text` header. The `date` column
    /// (YYYY-MM-DD) becomes the reference date for that entry's parse.
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help = "Path to the message log CSV file (columns: id, date, text)"
    )]
    pub input_path: Option<PathBuf>,

    /// Maximum number of log entries handled per pass
    #[arg(
        short = 'n',
        long = "batch-size",
        value_name = "COUNT",
        default_value_t = DEFAULT_BATCH_SIZE,
        help = "Maximum number of log entries handled per pass"
    )]
    pub batch_size: usize,

    /// Only process messages of one report type
    ///
    /// Matched case-insensitively against the leading code token of each
    /// message. Must be one of the registered report codes.
    #[arg(
        short = 't',
        long = "type",
        value_name = "CODE",
        help = "Only process messages whose leading code matches this report type"
    )]
    pub type_filter: Option<String>,

    /// Randomly sample the work queue instead of taking it in log order
    #[arg(long = "shuffle", help = "Randomly sample the work queue")]
    pub shuffle: bool,

    /// Keep running passes until the work queue is drained
    ///
    /// Without this flag a single pass of at most --batch-size entries is
    /// performed.
    #[arg(long = "repeat", help = "Run passes until the work queue is drained")]
    pub repeat: bool,

    /// Number of parallel parse workers
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        default_value_t = default_workers(),
        help = "Number of parallel parse workers"
    )]
    pub workers: usize,

    /// Parse and count without storing anything
    #[arg(long = "dry-run", help = "Parse and count without storing anything")]
    pub dry_run: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors and critical messages. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for machine-readable results
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the schemas command (report type listing)
#[derive(Debug, Clone, Parser)]
pub struct SchemasArgs {
    /// Output format for the schema listing
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the schema listing"
    )]
    pub output_format: OutputFormat,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl ProcessArgs {
    /// Validate the process command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(input_path) = &self.input_path {
            if !input_path.exists() {
                return Err(Error::configuration(format!(
                    "Input file does not exist: {}",
                    input_path.display()
                )));
            }

            if !input_path.is_file() {
                return Err(Error::configuration(format!(
                    "Input path is not a file: {}",
                    input_path.display()
                )));
            }
        }

        if self.batch_size == 0 {
            return Err(Error::configuration(
                "Batch size must be greater than 0".to_string(),
            ));
        }

        if self.workers == 0 {
            return Err(Error::configuration(
                "Number of workers must be greater than 0".to_string(),
            ));
        }

        if self.workers > MAX_PARALLEL_WORKERS {
            return Err(Error::configuration(format!(
                "Number of workers cannot exceed {}",
                MAX_PARALLEL_WORKERS
            )));
        }

        if let Some(filter) = &self.type_filter {
            if !REPORT_CODES
                .iter()
                .any(|code| code.eq_ignore_ascii_case(filter))
            {
                return Err(Error::configuration(format!(
                    "Unknown report type '{}'. Registered types: {}",
                    filter,
                    REPORT_CODES.join(", ")
                )));
            }
        }

        Ok(())
    }

    /// Build the batch configuration from these arguments
    pub fn to_config(&self) -> Config {
        let defaults = Config::default();
        Config {
            input_path: self
                .input_path
                .clone()
                .unwrap_or(defaults.input_path),
            batch_size: self.batch_size,
            type_filter: self.type_filter.clone(),
            shuffle: self.shuffle,
            repeat: self.repeat,
            workers: self.workers,
            dry_run: self.dry_run,
        }
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Human
    }
}

impl SchemasArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

impl Default for ProcessArgs {
    fn default() -> Self {
        Self {
            input_path: None,
            batch_size: DEFAULT_BATCH_SIZE,
            type_filter: None,
            shuffle: false,
            repeat: false,
            workers: default_workers(),
            dry_run: false,
            verbose: 0,
            quiet: false,
            output_format: OutputFormat::Human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn args_for(file: &NamedTempFile) -> ProcessArgs {
        ProcessArgs {
            input_path: Some(file.path().to_path_buf()),
            ..ProcessArgs::default()
        }
    }

    fn log_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "id,date,text").unwrap();
        file
    }

    #[test]
    fn test_process_args_validation() {
        let file = log_file();
        let args = args_for(&file);
        assert!(args.validate().is_ok());

        let mut invalid_args = args.clone();
        invalid_args.workers = 0;
        assert!(invalid_args.validate().is_err());

        invalid_args.workers = MAX_PARALLEL_WORKERS + 1;
        assert!(invalid_args.validate().is_err());

        let mut invalid_args = args.clone();
        invalid_args.batch_size = 0;
        assert!(invalid_args.validate().is_err());

        let mut invalid_args = args.clone();
        invalid_args.input_path = Some(PathBuf::from("/nonexistent/messages.csv"));
        assert!(invalid_args.validate().is_err());
    }

    #[test]
    fn test_type_filter_must_be_registered() {
        let file = log_file();

        let mut args = args_for(&file);
        args.type_filter = Some("pre".to_string());
        assert!(args.validate().is_ok());

        args.type_filter = Some("NOPE".to_string());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_to_config_carries_every_option() {
        let file = log_file();
        let args = ProcessArgs {
            input_path: Some(file.path().to_path_buf()),
            batch_size: 100,
            type_filter: Some("DTH".to_string()),
            shuffle: true,
            repeat: true,
            workers: 3,
            dry_run: true,
            ..ProcessArgs::default()
        };

        let config = args.to_config();
        assert_eq!(config.input_path, file.path());
        assert_eq!(config.batch_size, 100);
        assert_eq!(config.type_filter.as_deref(), Some("DTH"));
        assert!(config.shuffle);
        assert!(config.repeat);
        assert_eq!(config.workers, 3);
        assert!(config.dry_run);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level() {
        let mut args = ProcessArgs::default();
        assert_eq!(args.get_log_level(), "warn");

        args.verbose = 1;
        assert_eq!(args.get_log_level(), "info");

        args.verbose = 2;
        assert_eq!(args.get_log_level(), "debug");

        args.verbose = 3;
        assert_eq!(args.get_log_level(), "trace");

        args.verbose = 0;
        args.quiet = true;
        assert_eq!(args.get_log_level(), "error");
    }

    #[test]
    fn test_show_progress() {
        let mut args = ProcessArgs::default();
        assert!(args.show_progress());

        args.output_format = OutputFormat::Json;
        assert!(!args.show_progress());

        args.output_format = OutputFormat::Human;
        args.quiet = true;
        assert!(!args.show_progress());
    }
}
