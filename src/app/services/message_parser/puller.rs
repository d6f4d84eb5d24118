//! Token extraction for one schema position
//!
//! The puller walks the remaining message text one whitespace-delimited
//! token at a time. Consumption is deterministic: a non-repeatable
//! position consumes exactly one token whether or not it is legal, so a
//! rejected token is never re-offered to a later position, and a
//! repeatable position stops silently at the first token its kind
//! rejects.

use chrono::NaiveDate;

use super::field_spec::FieldSpec;
use crate::app::models::{FieldData, ParseError, ParsedField};

/// Split the next whitespace-delimited token off the front of `text`
///
/// Returns the token and the unconsumed remainder, or `None` when only
/// whitespace remains.
pub fn split_token(text: &str) -> Option<(&str, &str)> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.find(char::is_whitespace) {
        Some(end) => Some((&trimmed[..end], &trimmed[end..])),
        None => Some((trimmed, "")),
    }
}

/// Extract one field's token(s) from the remaining text
///
/// Returns the parsed field, any errors recorded at this position, and
/// the remaining unconsumed text.
pub fn pull<'a>(
    spec: &FieldSpec,
    position: usize,
    remaining: &'a str,
    reference: NaiveDate,
) -> (ParsedField, Vec<ParseError>, &'a str) {
    if spec.is_repeatable() {
        pull_many(spec, remaining, reference)
    } else {
        pull_single(spec, position, remaining, reference)
    }
}

fn pull_single<'a>(
    spec: &FieldSpec,
    position: usize,
    remaining: &'a str,
    reference: NaiveDate,
) -> (ParsedField, Vec<ParseError>, &'a str) {
    let kind = spec.kind();

    let Some((token, rest)) = split_token(remaining) else {
        let field = ParsedField {
            kind: kind.name(),
            raw: Vec::new(),
            data: FieldData::Single(None),
        };
        return (field, vec![ParseError::missing(position, kind.name())], remaining);
    };

    let codes = kind.is_legal(token, reference);
    let (value, errors) = if codes.is_empty() {
        match kind.convert(token) {
            Some(value) => (Some(value), Vec::new()),
            None => (
                None,
                vec![ParseError::field(kind.error_code(), position, kind.name())],
            ),
        }
    } else {
        (
            None,
            codes
                .into_iter()
                .map(|code| ParseError::field(code, position, kind.name()))
                .collect(),
        )
    };

    let field = ParsedField {
        kind: kind.name(),
        raw: vec![token.to_string()],
        data: FieldData::Single(value),
    };
    (field, errors, rest)
}

fn pull_many<'a>(
    spec: &FieldSpec,
    remaining: &'a str,
    reference: NaiveDate,
) -> (ParsedField, Vec<ParseError>, &'a str) {
    let kind = spec.kind();
    let mut raw = Vec::new();
    let mut values = Vec::new();
    let mut rest = remaining;

    while let Some((token, next)) = split_token(rest) {
        if !kind.is_legal(token, reference).is_empty() {
            break;
        }
        let Some(value) = kind.convert(token) else {
            break;
        };
        raw.push(token.to_string());
        values.push(value);
        rest = next;
    }

    let field = ParsedField {
        kind: kind.name(),
        raw,
        data: FieldData::Many(values),
    };
    (field, Vec::new(), rest)
}
