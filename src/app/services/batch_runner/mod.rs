//! Batch processing of message logs
//!
//! This module iterates a message-log CSV file, parses each entry against
//! its recorded reference date, and routes the outcomes to a storage
//! sink. It handles work-queue selection (type filter, random sampling,
//! batch-size cap), bounded parallel parsing, repeat-until-drained runs,
//! and statistics.
//!
//! The components:
//! - [`log_reader`] - Message log file reading
//! - [`runner`] - The batch loop and outcome routing
//! - [`stats`] - Batch statistics and summaries

pub mod log_reader;
pub mod runner;
pub mod stats;

// Re-export main types for easy access
pub use log_reader::{MessageLogEntry, read_message_log};
pub use runner::BatchRunner;
pub use stats::BatchStats;
