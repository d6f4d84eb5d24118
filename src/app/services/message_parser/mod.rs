//! SMS report parser for 1000 Days health messages
//!
//! This module implements the message-parsing and validation engine: a
//! catalog of reusable field kinds, per-report-type schemas, and an
//! error-tolerant parse that surfaces every malformed field in one pass.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`field_kind`] - Validation and conversion rules for single tokens
//! - [`field_spec`] - Schema positions pairing a kind with repeatability
//! - [`puller`] - Token extraction for one schema position
//! - [`catalog`] - Report-code → schema registry with Unknown fallback
//! - [`semantics`] - Cross-field checks run after field validation
//! - [`engine`] - Parse orchestration and the outcome model
//!
//! ## Usage
//!
//! ```rust
//! use thousanddays_processor::MessageParser;
//! use thousanddays_processor::app::models::ParseOutcome;
//!
//! let parser = MessageParser::new();
//! match parser.parse("DTH AAAAAAAAAAAAAAAA 5 01.02.2020 HO ND") {
//!     ParseOutcome::Valid(message) => println!("decoded {}", message.code),
//!     ParseOutcome::Failed(failure) => println!("{} error(s)", failure.errors().len()),
//!     ParseOutcome::Unknown(report) => println!("unrecognized code {}", report.code),
//! }
//! ```

pub mod catalog;
pub mod engine;
pub mod field_kind;
pub mod field_spec;
pub mod puller;
pub mod semantics;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use catalog::{MessageSchema, SchemaCatalog};
pub use engine::MessageParser;
pub use field_kind::FieldKind;
pub use field_spec::FieldSpec;
pub use semantics::SemanticCheck;
