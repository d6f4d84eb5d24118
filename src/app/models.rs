//! Data models for SMS report parsing
//!
//! This module contains the core data structures for representing decoded
//! health reports: converted field values, per-position parse results,
//! validation errors, and the overall parse outcome model.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

use crate::constants::error_codes;

// =============================================================================
// Field Values
// =============================================================================

/// A converted semantic value produced by a field kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Verbatim text token (identifiers, short codes)
    Text(String),
    /// Whole number (counts, visit numbers)
    Int(i64),
    /// Decimal number (weights, measurements)
    Float(f64),
    /// Calendar date parsed from a D.M.YYYY token
    Date(NaiveDate),
}

impl FieldValue {
    /// Get the text value if this is a text field
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer value if this is an integer field
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the decimal value if this is a decimal field
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get the date value if this is a date field
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Int(n) => write!(f, "{}", n),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Date(d) => write!(f, "{}", d.format("%d.%m.%Y")),
        }
    }
}

// =============================================================================
// Parsed Fields
// =============================================================================

/// Converted value(s) held by one schema position
///
/// Non-repeatable positions hold at most one value (`None` when the token
/// was missing or illegal). Repeatable positions hold the ordered sequence
/// of accepted values, which may be empty.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldData {
    Single(Option<FieldValue>),
    Many(Vec<FieldValue>),
}

/// Parse result for one schema position
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedField {
    /// Name of the field kind that governed this position
    pub kind: &'static str,

    /// Raw token(s) consumed from the input, in order
    pub raw: Vec<String>,

    /// Converted value(s)
    pub data: FieldData,
}

impl ParsedField {
    /// Whether this position came from a repeatable spec
    pub fn is_repeatable(&self) -> bool {
        matches!(self.data, FieldData::Many(_))
    }

    /// The single converted value, if present
    ///
    /// Returns `None` for repeatable positions; use [`ParsedField::sequence`].
    pub fn single(&self) -> Option<&FieldValue> {
        match &self.data {
            FieldData::Single(value) => value.as_ref(),
            FieldData::Many(_) => None,
        }
    }

    /// The ordered value sequence of a repeatable position
    ///
    /// Returns an empty slice for non-repeatable positions.
    pub fn sequence(&self) -> &[FieldValue] {
        match &self.data {
            FieldData::Many(values) => values,
            FieldData::Single(_) => &[],
        }
    }
}

// =============================================================================
// Parse Errors
// =============================================================================

/// One validation problem detected during a parse
///
/// Errors are never discarded; their order reflects schema position first,
/// then detection order within a position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseError {
    /// Stable error code (see [`crate::constants::error_codes`])
    pub code: &'static str,

    /// Schema position of the originating field spec, when field-scoped
    pub position: Option<usize>,

    /// Name of the field kind at that position, when field-scoped
    pub kind: Option<&'static str>,

    /// Free-text context, e.g. the superfluous leftover text verbatim
    pub detail: Option<String>,
}

impl ParseError {
    /// Create a field-scoped validation error
    pub fn field(code: &'static str, position: usize, kind: &'static str) -> Self {
        Self {
            code,
            position: Some(position),
            kind: Some(kind),
            detail: None,
        }
    }

    /// Create a missing-field error for a schema position
    pub fn missing(position: usize, kind: &'static str) -> Self {
        Self::field(error_codes::MISSING_FIELD, position, kind)
    }

    /// Create the structural error for unconsumed trailing text
    pub fn superfluous(leftover: impl Into<String>) -> Self {
        Self {
            code: error_codes::SUPERFLUOUS_TEXT,
            position: None,
            kind: None,
            detail: Some(leftover.into()),
        }
    }

    /// Create a message-level semantic error
    pub fn semantic(code: &'static str, detail: impl Into<String>) -> Self {
        Self {
            code,
            position: None,
            kind: None,
            detail: Some(detail.into()),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)?;
        if let (Some(position), Some(kind)) = (self.position, self.kind) {
            write!(f, " at position {} ({})", position, kind)?;
        }
        if let Some(detail) = &self.detail {
            write!(f, ": \"{}\"", detail)?;
        }
        Ok(())
    }
}

// =============================================================================
// Messages and Parse Outcomes
// =============================================================================

/// One decoded report instance produced by a single parse call
///
/// Fields are ordered exactly as the schema declares them. The entries
/// lookup has one entry per distinct field kind referenced by the schema;
/// repeatable fields collapse to the single entry holding their sequence.
#[derive(Debug, Clone)]
pub struct Message {
    /// Report type code, uppercased (e.g. "PRE")
    pub code: String,

    /// Lowercase report name used as the principal entity (e.g. "pregnancy")
    pub report_name: &'static str,

    /// Original message text as received
    pub text: String,

    /// Reference date the parse was evaluated against
    pub reference_date: NaiveDate,

    /// Parsed fields in schema declaration order
    pub fields: Vec<ParsedField>,

    /// Every validation error detected, in order
    pub errors: Vec<ParseError>,

    entries: HashMap<&'static str, usize>,
}

impl Message {
    /// Assemble a message from parsed fields and errors
    pub fn new(
        code: impl Into<String>,
        report_name: &'static str,
        text: impl Into<String>,
        reference_date: NaiveDate,
        fields: Vec<ParsedField>,
        errors: Vec<ParseError>,
    ) -> Self {
        let entries = fields
            .iter()
            .enumerate()
            .map(|(index, field)| (field.kind, index))
            .collect();

        Self {
            code: code.into(),
            report_name,
            text: text.into(),
            reference_date,
            fields,
            errors,
            entries,
        }
    }

    /// A message is valid iff no error of either tier was recorded
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Look up the parsed field for a field kind by name
    pub fn entry(&self, kind: &str) -> Option<&ParsedField> {
        self.entries.get(kind).map(|&index| &self.fields[index])
    }

    /// Iterate the entries lookup (kind name, parsed field)
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &ParsedField)> {
        self.entries
            .iter()
            .map(|(&kind, &index)| (kind, &self.fields[index]))
    }
}

/// A parse that detected validation errors
///
/// Carries the partial message context plus the complete ordered error
/// list so a caller can log or audit every problem from one call.
#[derive(Debug, Clone)]
pub struct ParseFailure {
    /// The partial message, fields populated as far as parsing got
    pub message: Message,
}

impl ParseFailure {
    /// The complete ordered error list
    pub fn errors(&self) -> &[ParseError] {
        &self.message.errors
    }
}

/// A message whose leading code matched no registered schema
///
/// Not an error condition: callers decide how to route unknown messages.
#[derive(Debug, Clone)]
pub struct UnknownReport {
    /// The unmatched leading token as received
    pub code: String,

    /// Original message text as received
    pub text: String,
}

/// Result of parsing one message
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    /// Both validation tiers passed
    Valid(Message),
    /// Field-level or semantic validation failed
    Failed(ParseFailure),
    /// The leading code matched no registered schema
    Unknown(UnknownReport),
}

impl ParseOutcome {
    /// Whether this outcome is a valid message
    pub fn is_valid(&self) -> bool {
        matches!(self, ParseOutcome::Valid(_))
    }

    /// The decoded message, valid or partial, when one exists
    pub fn message(&self) -> Option<&Message> {
        match self {
            ParseOutcome::Valid(message) => Some(message),
            ParseOutcome::Failed(failure) => Some(&failure.message),
            ParseOutcome::Unknown(_) => None,
        }
    }
}
