//! Schema-driven parse engine
//!
//! The engine drives a message schema over the input text: every field
//! spec is pulled in declaration order regardless of earlier failures, so
//! a single pass surfaces every malformed field. Semantic checking only
//! runs once zero field-level errors exist; the tiers short-circuit, the
//! field loop never does.

use chrono::{Local, NaiveDate};
use tracing::debug;

use super::catalog::{MessageSchema, SchemaCatalog};
use super::puller::{pull, split_token};
use crate::app::models::{Message, ParseError, ParseFailure, ParseOutcome, UnknownReport};

/// Parser for SMS health reports
///
/// Holds the immutable schema catalog. Parsing is a pure function of
/// (schema, text, reference date), so one parser may be shared freely
/// across threads.
#[derive(Debug)]
pub struct MessageParser {
    catalog: SchemaCatalog,
}

impl MessageParser {
    /// Create a parser over the standard report catalog
    pub fn new() -> Self {
        Self::with_catalog(SchemaCatalog::standard())
    }

    /// Create a parser over a custom catalog
    pub fn with_catalog(catalog: SchemaCatalog) -> Self {
        Self { catalog }
    }

    /// The catalog this parser dispatches on
    pub fn catalog(&self) -> &SchemaCatalog {
        &self.catalog
    }

    /// Parse a message against today's date
    pub fn parse(&self, text: &str) -> ParseOutcome {
        self.parse_as_of(text, Local::now().date_naive())
    }

    /// Parse a message against a caller-supplied reference date
    ///
    /// The leading whitespace-delimited token of the trimmed text selects
    /// the schema, case-insensitively. A code with no registered schema
    /// yields [`ParseOutcome::Unknown`], never an error.
    pub fn parse_as_of(&self, text: &str, reference: NaiveDate) -> ParseOutcome {
        let trimmed = text.trim();
        let Some((code, remaining)) = split_token(trimmed) else {
            debug!("Empty message text");
            return ParseOutcome::Unknown(UnknownReport {
                code: String::new(),
                text: text.to_string(),
            });
        };

        match self.catalog.lookup(code) {
            Some(schema) => process(&schema, code, remaining, reference, text),
            None => {
                debug!("No schema registered for code '{}'", code);
                ParseOutcome::Unknown(UnknownReport {
                    code: code.to_string(),
                    text: text.to_string(),
                })
            }
        }
    }
}

impl Default for MessageParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Drive one schema over the text following the report code
pub(crate) fn process(
    schema: &MessageSchema,
    code: &str,
    remaining: &str,
    reference: NaiveDate,
    original: &str,
) -> ParseOutcome {
    let mut fields = Vec::with_capacity(schema.fields().len());
    let mut errors = Vec::new();
    let mut rest = remaining;

    for (position, spec) in schema.fields().iter().enumerate() {
        let (field, mut field_errors, next) = pull(spec, position, rest, reference);
        fields.push(field);
        errors.append(&mut field_errors);
        rest = next;
    }

    let leftover = rest.trim();
    if !leftover.is_empty() {
        errors.push(ParseError::superfluous(leftover));
    }

    let mut message = Message::new(
        code.to_uppercase(),
        schema.report_name(),
        original,
        reference,
        fields,
        errors,
    );

    if !message.errors.is_empty() {
        debug!(
            "{} message failed field validation with {} error(s)",
            message.code,
            message.errors.len()
        );
        return ParseOutcome::Failed(ParseFailure { message });
    }

    let semantic_errors = schema.semantic_check().run(&message);
    if !semantic_errors.is_empty() {
        debug!(
            "{} message failed semantic validation with {} error(s)",
            message.code,
            semantic_errors.len()
        );
        message.errors = semantic_errors;
        return ParseOutcome::Failed(ParseFailure { message });
    }

    ParseOutcome::Valid(message)
}
