//! Message-type semantic checks
//!
//! A semantic check is a cross-field predicate run only after every
//! field-level check passed. Most report types carry no check; pregnancy
//! reports validate that their two dates are chronologically coherent.

use chrono::NaiveDate;

use crate::app::models::{FieldValue, Message, ParseError, ParsedField};
use crate::constants::error_codes;

/// Cross-field validation applied to a syntactically clean message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticCheck {
    /// No cross-field constraint; always passes
    Unchecked,
    /// The LMP date must precede the expected delivery date
    PregnancyDates,
}

impl SemanticCheck {
    /// Run the check; an empty result means the message is coherent
    pub fn run(&self, message: &Message) -> Vec<ParseError> {
        match self {
            SemanticCheck::Unchecked => Vec::new(),
            SemanticCheck::PregnancyDates => check_pregnancy_dates(message),
        }
    }
}

fn check_pregnancy_dates(message: &Message) -> Vec<ParseError> {
    let lmp = message.entry("lmp").and_then(field_date);
    let delivery = message.entry("report_date").and_then(field_date);

    match (lmp, delivery) {
        (Some(lmp), Some(delivery)) if lmp >= delivery => {
            vec![ParseError::semantic(
                error_codes::INCOHERENT_DATE_PERIODS,
                format!(
                    "last menstrual period {} does not precede the expected delivery date {}",
                    lmp.format("%d.%m.%Y"),
                    delivery.format("%d.%m.%Y")
                ),
            )]
        }
        _ => Vec::new(),
    }
}

fn field_date(field: &ParsedField) -> Option<NaiveDate> {
    field.single().and_then(FieldValue::as_date)
}
