//! Storage sink contract and report persistence
//!
//! The parse core never persists anything itself; callers route parse
//! outcomes outward through the [`sink::ReportSink`] contract. This
//! module provides that contract, an in-memory reference implementation,
//! and the transfer routines that map outcomes onto sink rows:
//! - a valid message becomes one principal row plus one auxiliary row per
//!   repeatable-field value referencing the principal's generated id
//! - a failure becomes one audit row per parse error
//! - every treated log entry becomes one bookkeeping row
//!
//! Table and column provisioning is deliberately absent: sinks bring
//! their own storage layout.

pub mod sink;
pub mod transfer;

// Re-export main types for easy access
pub use sink::{AttributeValue, MemoryStore, ReportSink};
pub use transfer::{persist_failure, persist_report, persist_treatment};
