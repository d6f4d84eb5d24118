//! Configuration management and validation.
//!
//! Provides the configuration structure for batch processing runs:
//! message log location, batch sizing, report type filtering, work-queue
//! sampling, and parallelism.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use crate::constants::{DEFAULT_BATCH_SIZE, MAX_PARALLEL_WORKERS, REPORT_CODES};
use crate::{Error, Result};

/// Batch processing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the message log CSV file (columns: id, date, text)
    pub input_path: PathBuf,

    /// Maximum number of log entries handled per pass
    pub batch_size: usize,

    /// Only process messages whose leading code matches this report type
    pub type_filter: Option<String>,

    /// Randomly sample the work queue instead of taking it in order
    pub shuffle: bool,

    /// Keep running passes until the work queue is drained
    pub repeat: bool,

    /// Number of parallel parse workers
    pub workers: usize,

    /// Parse and count without storing anything
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("messages.csv"),
            batch_size: DEFAULT_BATCH_SIZE,
            type_filter: None,
            shuffle: false,
            repeat: false,
            workers: default_workers(),
            dry_run: false,
        }
    }
}

/// Default worker count, bounded by the available CPUs
pub fn default_workers() -> usize {
    num_cpus::get().clamp(1, MAX_PARALLEL_WORKERS)
}

impl Config {
    /// Validate the configuration for consistency
    pub fn validate(&self) -> Result<()> {
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
                return Err(Error::unknown_report_type(filter.clone()));
            }
        }

        debug!("Configuration validated: {:?}", self);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
        assert!(config.workers >= 1);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let config = Config {
            batch_size: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_worker_bounds() {
        let config = Config {
            workers: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            workers: MAX_PARALLEL_WORKERS + 1,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_type_filter_validation() {
        let config = Config {
            type_filter: Some("pre".to_string()),
            ..Config::default()
        };
        assert!(config.validate().is_ok());

        let config = Config {
            type_filter: Some("NOPE".to_string()),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::UnknownReportType { .. })
        ));
    }
}
