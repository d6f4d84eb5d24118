//! Integration tests for the message parser through the public API
//!
//! These tests exercise the parse engine end-to-end against the standard
//! report catalog: valid reports, unknown codes, error-tolerant field
//! validation, repeatable fields, and the structural leftover-text check.

use chrono::NaiveDate;
use thousanddays_processor::MessageParser;
use thousanddays_processor::app::models::{FieldValue, ParseOutcome};

/// Fixed reference date so date gap checks are deterministic
fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 6, 1).unwrap()
}

fn parse(text: &str) -> ParseOutcome {
    MessageParser::new().parse_as_of(text, reference_date())
}

#[test]
fn test_valid_pregnancy_report_decodes_every_field() {
    let outcome = parse("PRE AAAAAAAAAAAAAAAA 01.02.2020 15.03.2020 2 1 GS CH HO WT50.5 TO HW");

    let ParseOutcome::Valid(message) = outcome else {
        panic!("expected a valid message, got {:?}", outcome);
    };

    assert_eq!(message.code, "PRE");
    assert!(message.is_valid());
    assert!(message.errors.is_empty());

    assert_eq!(
        message
            .entry("patient_id")
            .and_then(|f| f.single())
            .and_then(FieldValue::as_text),
        Some("AAAAAAAAAAAAAAAA")
    );
    assert_eq!(
        message
            .entry("lmp")
            .and_then(|f| f.single())
            .and_then(FieldValue::as_date),
        NaiveDate::from_ymd_opt(2020, 2, 1)
    );
    assert_eq!(
        message
            .entry("gravidity")
            .and_then(|f| f.single())
            .and_then(FieldValue::as_int),
        Some(2)
    );
    assert_eq!(
        message
            .entry("weight")
            .and_then(|f| f.single())
            .and_then(FieldValue::as_float),
        Some(50.5)
    );

    // Field order matches schema declaration order
    let kinds: Vec<&str> = message.fields.iter().map(|f| f.kind).collect();
    assert_eq!(
        kinds,
        vec![
            "patient_id",
            "lmp",
            "report_date",
            "gravidity",
            "parity",
            "pregnancy",
            "symptom",
            "location",
            "weight",
            "toilet",
            "handwash",
        ]
    );
}

#[test]
fn test_unknown_code_routes_to_unknown_without_errors() {
    let outcome = parse("XXX foo bar");

    let ParseOutcome::Unknown(report) = outcome else {
        panic!("expected the unknown outcome, got {:?}", outcome);
    };
    assert_eq!(report.code, "XXX");
    assert_eq!(report.text, "XXX foo bar");
}

#[test]
fn test_wrong_length_id_is_tagged_to_position_zero() {
    let outcome = parse("PRE short 01.02.2020 15.03.2020 2 1 GS CH HO WT50.5 TO HW");

    let ParseOutcome::Failed(failure) = outcome else {
        panic!("expected a failure, got {:?}", outcome);
    };
    let errors = failure.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, "bad_patient_id");
    assert_eq!(errors[0].position, Some(0));

    // Later fields were still attempted: the whole schema was walked
    let message = &failure.message;
    assert_eq!(message.fields.len(), 11);
    assert_eq!(
        message
            .entry("handwash")
            .and_then(|f| f.single())
            .and_then(FieldValue::as_text),
        Some("HW")
    );
}

#[test]
fn test_calendar_impossible_date_is_reported() {
    let outcome = parse("DTH AAAAAAAAAAAAAAAA 5 31.02.2020 HO ND");

    let ParseOutcome::Failed(failure) = outcome else {
        panic!("expected a failure, got {:?}", outcome);
    };
    assert!(
        failure
            .errors()
            .iter()
            .any(|e| e.code == "impossible_date")
    );
}

#[test]
fn test_leftover_text_yields_one_structural_error_with_payload() {
    let outcome = parse("REF 0123456789012345 extra words");

    let ParseOutcome::Failed(failure) = outcome else {
        panic!("expected a failure, got {:?}", outcome);
    };
    let errors = failure.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, "superfluous_text");
    assert_eq!(errors[0].detail.as_deref(), Some("extra words"));
}

#[test]
fn test_k_invalid_fields_produce_exactly_k_errors() {
    // Bad id, bad number, impossible date, bad location, bad death code
    let outcome = parse("DTH short abc 31.02.2020 XX YY");

    let ParseOutcome::Failed(failure) = outcome else {
        panic!("expected a failure, got {:?}", outcome);
    };
    assert_eq!(failure.errors().len(), 5);

    // Errors come out in schema position order
    let positions: Vec<Option<usize>> =
        failure.errors().iter().map(|e| e.position).collect();
    assert_eq!(
        positions,
        vec![Some(0), Some(1), Some(2), Some(3), Some(4)]
    );
}

#[test]
fn test_repeatable_field_matches_zero_tokens_without_error() {
    // No symptoms between the visit number and the location code
    let outcome = parse("ANC AAAAAAAAAAAAAAAA 01.02.2020 ANC2 HO WT61.0");

    let ParseOutcome::Valid(message) = outcome else {
        panic!("expected a valid message, got {:?}", outcome);
    };
    assert_eq!(message.entry("symptom").map(|f| f.sequence().len()), Some(0));
    assert_eq!(
        message
            .entry("anc_visit")
            .and_then(|f| f.single())
            .and_then(FieldValue::as_int),
        Some(2)
    );
}

#[test]
fn test_repeatable_field_stops_at_first_illegal_token_without_error() {
    // Three symptoms, then the location code stops the run
    let outcome = parse("RISK AAAAAAAAAAAAAAAA CH DI FE HO WT55.0");

    let ParseOutcome::Valid(message) = outcome else {
        panic!("expected a valid message, got {:?}", outcome);
    };
    let symptoms: Vec<&str> = message
        .entry("symptom")
        .map(|f| f.sequence().iter().filter_map(FieldValue::as_text).collect())
        .unwrap_or_default();
    assert_eq!(symptoms, vec!["CH", "DI", "FE"]);
    assert_eq!(
        message
            .entry("location")
            .and_then(|f| f.single())
            .and_then(FieldValue::as_text),
        Some("HO")
    );
}

#[test]
fn test_code_dispatch_ignores_case_and_leading_whitespace() {
    let outcome = parse("  ref 0123456789012345");

    let ParseOutcome::Valid(message) = outcome else {
        panic!("expected a valid message, got {:?}", outcome);
    };
    assert_eq!(message.code, "REF");
}

#[test]
fn test_parse_with_default_reference_date() {
    // The date-free REF schema works through the convenience entry point
    let outcome = MessageParser::new().parse("REF 0123456789012345");
    assert!(outcome.is_valid());
}
