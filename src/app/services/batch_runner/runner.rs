//! Batch processing loop over a message log
//!
//! The runner selects work from the log (type filter, optional random
//! sampling, batch-size cap), parses entries on parallel workers, and
//! routes every outcome to the storage sink. One malformed message never
//! aborts the batch; in repeat mode, passes continue until the queue is
//! drained.

use chrono::Local;
use indicatif::ProgressBar;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::log_reader::{MessageLogEntry, read_message_log};
use super::stats::BatchStats;
use crate::app::models::{ParseOutcome, UnknownReport};
use crate::app::services::message_parser::MessageParser;
use crate::app::services::message_parser::puller::split_token;
use crate::app::services::report_store::{
    ReportSink, persist_failure, persist_report, persist_treatment,
};
use crate::config::Config;
use crate::{Error, Result};

type UnknownHandler = Box<dyn Fn(&UnknownReport) + Send + Sync>;

/// Batch processor for message log files
pub struct BatchRunner {
    parser: Arc<MessageParser>,
    config: Config,
    unknown_handler: Option<UnknownHandler>,
}

impl BatchRunner {
    /// Create a runner over the standard report catalog
    pub fn new(config: Config) -> Self {
        Self::with_parser(config, Arc::new(MessageParser::new()))
    }

    /// Create a runner with a custom parser
    pub fn with_parser(config: Config, parser: Arc<MessageParser>) -> Self {
        Self {
            parser,
            config,
            unknown_handler: None,
        }
    }

    /// Install a handler invoked for every unknown-code message
    ///
    /// Without a handler, unknown messages are logged at warn level.
    pub fn on_unknown(mut self, handler: impl Fn(&UnknownReport) + Send + Sync + 'static) -> Self {
        self.unknown_handler = Some(Box::new(handler));
        self
    }

    /// Process the configured message log into the sink
    pub async fn run(&self, sink: &dyn ReportSink) -> Result<BatchStats> {
        self.run_with_progress(sink, None).await
    }

    /// Process the configured message log, reporting per-entry progress
    pub async fn run_with_progress(
        &self,
        sink: &dyn ReportSink,
        progress: Option<&ProgressBar>,
    ) -> Result<BatchStats> {
        let start_time = Instant::now();

        let entries = read_message_log(&self.config.input_path)?;
        let selected: Vec<MessageLogEntry> = entries
            .into_iter()
            .filter(|entry| self.matches_filter(entry))
            .collect();

        let mut stats = BatchStats::new();
        stats.total_entries = selected.len();

        let planned = if self.config.repeat {
            selected.len()
        } else {
            selected.len().min(self.config.batch_size)
        };
        if let Some(bar) = progress {
            bar.set_length(planned as u64);
        }

        info!(
            "Processing {} of {} selected log entries from {}",
            planned,
            selected.len(),
            self.config.input_path.display()
        );

        let mut treated: HashSet<i64> = HashSet::new();
        loop {
            let mut pending: Vec<MessageLogEntry> = selected
                .iter()
                .filter(|entry| !treated.contains(&entry.id))
                .cloned()
                .collect();
            if pending.is_empty() {
                break;
            }

            if self.config.shuffle {
                pending.shuffle(&mut rand::thread_rng());
            }
            pending.truncate(self.config.batch_size);

            stats.passes += 1;
            debug!("Pass {}: handling {} message(s)", stats.passes, pending.len());

            for (entry, outcome) in self.parse_batch(pending).await? {
                treated.insert(entry.id);
                self.route(sink, &entry, &outcome, &mut stats)?;
                stats.processed += 1;
                if let Some(bar) = progress {
                    bar.inc(1);
                }
            }

            if !self.config.repeat {
                break;
            }
        }

        stats.processing_time = start_time.elapsed();
        info!("Batch finished: {}", stats.summary());
        Ok(stats)
    }

    fn matches_filter(&self, entry: &MessageLogEntry) -> bool {
        match &self.config.type_filter {
            None => true,
            Some(filter) => split_token(&entry.text)
                .is_some_and(|(code, _)| code.eq_ignore_ascii_case(filter)),
        }
    }

    /// Parse a batch on parallel workers, preserving entry order
    async fn parse_batch(
        &self,
        entries: Vec<MessageLogEntry>,
    ) -> Result<Vec<(MessageLogEntry, ParseOutcome)>> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let workers = self.config.workers.max(1);
        let chunk_size = entries.len().div_ceil(workers).max(1);

        let mut handles = Vec::new();
        for chunk in entries.chunks(chunk_size) {
            let chunk = chunk.to_vec();
            let parser = Arc::clone(&self.parser);
            handles.push(tokio::task::spawn_blocking(move || {
                chunk
                    .into_iter()
                    .map(|entry| {
                        let reference = entry
                            .date
                            .unwrap_or_else(|| Local::now().date_naive());
                        let outcome = parser.parse_as_of(&entry.text, reference);
                        (entry, outcome)
                    })
                    .collect::<Vec<_>>()
            }));
        }

        let mut results = Vec::with_capacity(handles.len() * chunk_size);
        for joined in futures::future::join_all(handles).await {
            let batch = joined.map_err(|e| {
                Error::processing_interrupted(format!("Parse worker panicked: {}", e))
            })?;
            results.extend(batch);
        }
        Ok(results)
    }

    fn route(
        &self,
        sink: &dyn ReportSink,
        entry: &MessageLogEntry,
        outcome: &ParseOutcome,
        stats: &mut BatchStats,
    ) -> Result<()> {
        match outcome {
            ParseOutcome::Valid(message) => {
                if !self.config.dry_run {
                    persist_report(sink, message)?;
                    persist_treatment(sink, entry.id, true)?;
                }
                stats.valid += 1;
            }
            ParseOutcome::Failed(failure) => {
                stats.errors_recorded += failure.errors().len();
                stats.failures.push(format!(
                    "entry {}: {}",
                    entry.id,
                    failure
                        .errors()
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("; ")
                ));
                if !self.config.dry_run {
                    persist_failure(sink, failure, entry.id)?;
                    persist_treatment(sink, entry.id, false)?;
                }
                stats.failed += 1;
            }
            ParseOutcome::Unknown(report) => {
                match &self.unknown_handler {
                    Some(handler) => handler(report),
                    None => warn!(
                        "Unrecognized report code '{}' in log entry {}",
                        report.code, entry.id
                    ),
                }
                if !self.config.dry_run {
                    persist_treatment(sink, entry.id, false)?;
                }
                stats.unknown += 1;
            }
        }
        Ok(())
    }
}
