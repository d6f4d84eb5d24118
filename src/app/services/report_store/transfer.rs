//! Mapping parse outcomes onto storage sink rows

use tracing::debug;

use super::sink::{AttributeValue, ReportSink};
use crate::Result;
use crate::app::models::{Message, ParseFailure};
use crate::constants::tables;

/// Persist a valid message as one principal row plus auxiliary rows
///
/// Scalar entries become columns of the principal row, stored under the
/// message's report name. Each repeatable field contributes one auxiliary
/// row per accepted value in `<report>_<kind>`, carrying the principal's
/// generated id. Returns the principal id.
pub fn persist_report(sink: &dyn ReportSink, message: &Message) -> Result<i64> {
    let mut principal = Vec::new();
    for field in &message.fields {
        if field.is_repeatable() {
            continue;
        }
        if let Some(value) = field.single() {
            principal.push((field.kind.to_string(), AttributeValue::from(value)));
        }
    }

    let principal_id = sink.store(message.report_name, &principal)?;
    debug!(
        "Stored {} principal row {} with {} column(s)",
        message.report_name,
        principal_id,
        principal.len()
    );

    for field in &message.fields {
        if !field.is_repeatable() {
            continue;
        }
        let entity = format!("{}_{}", message.report_name, field.kind);
        for value in field.sequence() {
            sink.store(
                &entity,
                &[
                    (
                        tables::PRINCIPAL_COLUMN.to_string(),
                        AttributeValue::Id(principal_id),
                    ),
                    (tables::VALUE_COLUMN.to_string(), AttributeValue::from(value)),
                ],
            )?;
        }
    }

    Ok(principal_id)
}

/// Persist one audit row per parse error of a failed message
pub fn persist_failure(sink: &dyn ReportSink, failure: &ParseFailure, oldid: i64) -> Result<()> {
    for (position, error) in failure.errors().iter().enumerate() {
        sink.store(
            tables::FAILED_TRANSFERS,
            &[
                ("oldid".to_string(), AttributeValue::Int(oldid)),
                (
                    "message".to_string(),
                    AttributeValue::Text(failure.message.text.clone()),
                ),
                (
                    "failcode".to_string(),
                    AttributeValue::Text(error.code.to_string()),
                ),
                ("failpos".to_string(), AttributeValue::Int(position as i64)),
            ],
        )?;
    }
    Ok(())
}

/// Record that a log entry was treated, successfully or not
pub fn persist_treatment(sink: &dyn ReportSink, oldid: i64, success: bool) -> Result<i64> {
    sink.store(
        tables::TREATED_MESSAGES,
        &[
            ("oldid".to_string(), AttributeValue::Int(oldid)),
            ("success".to_string(), AttributeValue::Bool(success)),
        ],
    )
}
