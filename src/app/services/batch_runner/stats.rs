//! Batch processing statistics

use serde::Serialize;

/// Counters accumulated over one batch run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchStats {
    /// Entries selected from the log after filtering
    pub total_entries: usize,

    /// Entries actually treated (bounded by batch size and passes)
    pub processed: usize,

    /// Messages that decoded into valid reports
    pub valid: usize,

    /// Messages that failed field-level or semantic validation
    pub failed: usize,

    /// Messages whose leading code matched no schema
    pub unknown: usize,

    /// Total parse errors recorded across all failures
    pub errors_recorded: usize,

    /// Number of passes over the work queue (greater than 1 in repeat mode)
    pub passes: usize,

    /// Failure samples for debugging
    pub failures: Vec<String>,

    /// Total processing time
    #[serde(skip)]
    pub processing_time: std::time::Duration,
}

impl BatchStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of processed messages that decoded validly, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.processed == 0 {
            0.0
        } else {
            (self.valid as f64 / self.processed as f64) * 100.0
        }
    }

    /// One-line human summary
    pub fn summary(&self) -> String {
        format!(
            "{} processed: {} valid, {} failed ({} error(s)), {} unknown ({:.1}% success)",
            self.processed,
            self.valid,
            self.failed,
            self.errors_recorded,
            self.unknown,
            self.success_rate()
        )
    }
}
