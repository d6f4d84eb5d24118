//! 1000 Days Report Processor Library
//!
//! A Rust library for decoding free-form, whitespace-delimited SMS text
//! reports from community health workers into typed, validated records.
//!
//! This library provides tools for:
//! - Parsing SMS report text against per-report-type schemas
//! - A reusable catalog of field kinds with validation and conversion rules
//! - Error-tolerant validation that surfaces every malformed field in one pass
//! - Routing parse outcomes to a pluggable storage sink
//! - Batch processing of message logs with progress reporting and statistics

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod batch_runner;
        pub mod message_parser;
        pub mod report_store;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{FieldValue, Message, ParseError, ParseOutcome, ParsedField};
pub use app::services::message_parser::MessageParser;
pub use config::Config;

/// Result type alias for the report processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for report processing operations
///
/// A report that fails validation is not an [`Error`]: parse problems are
/// data, carried in [`app::models::ParseOutcome`]. This enum covers the
/// operational failures around the parse core — I/O, configuration, the
/// message log file, and the storage sink.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Message log file error
    #[error("Message log error in file '{file}': {message}")]
    MessageLog {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Storage sink error
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Date parsing error
    #[error("Date parsing error: {message}")]
    DateParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Unknown report type code
    #[error("Unknown report type: {code}")]
    UnknownReportType { code: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an I/O error with a simple message
    pub fn io_error(message: impl Into<String>) -> Self {
        let message_str = message.into();
        Self::Io {
            message: message_str.clone(),
            source: std::io::Error::other(message_str),
        }
    }

    /// Create a message log error with context
    pub fn message_log(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::MessageLog {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a storage sink error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a date parsing error
    pub fn date_parsing(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateParsing {
            message: message.into(),
            source,
        }
    }

    /// Create an unknown report type error
    pub fn unknown_report_type(code: impl Into<String>) -> Self {
        Self::UnknownReportType { code: code.into() }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::MessageLog {
            file: "unknown".to_string(),
            message: "Message log parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateParsing {
            message: "Date parsing failed".to_string(),
            source: error,
        }
    }
}
