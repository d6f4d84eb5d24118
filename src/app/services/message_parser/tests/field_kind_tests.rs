//! Tests for field kind validation and conversion rules

use super::super::field_kind::FieldKind;
use super::reference_date;
use crate::app::models::FieldValue;
use crate::constants::error_codes;
use chrono::NaiveDate;

#[test]
fn test_patient_id_length_enforcement() {
    let kind = FieldKind::patient_id();

    assert!(kind.is_legal("AAAAAAAAAAAAAAAA", reference_date()).is_empty());
    assert_eq!(
        kind.is_legal("short", reference_date()),
        vec![error_codes::BAD_PATIENT_ID]
    );
    assert_eq!(
        kind.is_legal("AAAAAAAAAAAAAAAAA", reference_date()),
        vec![error_codes::BAD_PATIENT_ID]
    );

    assert_eq!(
        kind.convert("AAAAAAAAAAAAAAAA"),
        Some(FieldValue::Text("AAAAAAAAAAAAAAAA".to_string()))
    );
}

#[test]
fn test_phone_id_shape() {
    let kind = FieldKind::phone_id();

    // Leading zero plus fifteen digits
    assert!(kind.is_legal("0123456789012345", reference_date()).is_empty());
    assert_eq!(
        kind.is_legal("1123456789012345", reference_date()),
        vec![error_codes::BAD_PHONE_ID]
    );
    assert_eq!(
        kind.is_legal("0123", reference_date()),
        vec![error_codes::BAD_PHONE_ID]
    );
}

#[test]
fn test_date_shape_and_conversion() {
    let kind = FieldKind::report_date();

    assert!(kind.is_legal("15.03.2020", reference_date()).is_empty());
    assert!(kind.is_legal("1.1.2020", reference_date()).is_empty());
    assert_eq!(
        kind.convert("15.03.2020"),
        Some(FieldValue::Date(NaiveDate::from_ymd_opt(2020, 3, 15).unwrap()))
    );

    assert_eq!(
        kind.is_legal("2020-03-15", reference_date()),
        vec![error_codes::BAD_DATE]
    );
    assert_eq!(
        kind.is_legal("15/03/2020", reference_date()),
        vec![error_codes::BAD_DATE]
    );
}

#[test]
fn test_date_calendar_impossibility() {
    let kind = FieldKind::report_date();

    assert_eq!(
        kind.is_legal("31.02.2020", reference_date()),
        vec![error_codes::IMPOSSIBLE_DATE]
    );
    assert_eq!(
        kind.is_legal("0.01.2020", reference_date()),
        vec![error_codes::IMPOSSIBLE_DATE]
    );
    // 2020 is a leap year
    assert!(kind.is_legal("29.02.2020", reference_date()).is_empty());
    assert_eq!(
        kind.is_legal("29.02.2019", reference_date()),
        vec![error_codes::IMPOSSIBLE_DATE]
    );
}

#[test]
fn test_lmp_gap_rule() {
    let kind = FieldKind::lmp();
    let reference = NaiveDate::from_ymd_opt(2020, 3, 15).unwrap();

    // Before the reference date is legal
    assert!(kind.is_legal("01.02.2020", reference).is_empty());

    // On or after the reference date is incoherent
    assert_eq!(
        kind.is_legal("15.03.2020", reference),
        vec![error_codes::INCOHERENT_DATE_PERIODS]
    );
    assert_eq!(
        kind.is_legal("01.04.2020", reference),
        vec![error_codes::INCOHERENT_DATE_PERIODS]
    );
}

#[test]
fn test_report_date_has_no_gap_rule() {
    let kind = FieldKind::report_date();
    let reference = NaiveDate::from_ymd_opt(2020, 3, 15).unwrap();

    // Future dates pass the default gap check
    assert!(kind.is_legal("01.04.2021", reference).is_empty());
}

#[test]
fn test_number_is_fully_anchored() {
    let kind = FieldKind::number();

    assert!(kind.is_legal("12", reference_date()).is_empty());
    assert_eq!(kind.convert("12"), Some(FieldValue::Int(12)));

    assert_eq!(
        kind.is_legal("12abc", reference_date()),
        vec![error_codes::BAD_NUMBER]
    );
    assert_eq!(
        kind.is_legal("abc", reference_date()),
        vec![error_codes::BAD_NUMBER]
    );
}

#[test]
fn test_number_overflow_is_illegal() {
    let kind = FieldKind::number();

    // Shape matches but the value exceeds i64
    assert_eq!(
        kind.is_legal("99999999999999999999", reference_date()),
        vec![error_codes::BAD_NUMBER]
    );
}

#[test]
fn test_weight_prefixed_decimal() {
    let kind = FieldKind::weight();

    assert!(kind.is_legal("WT50.5", reference_date()).is_empty());
    assert_eq!(kind.convert("WT50.5"), Some(FieldValue::Float(50.5)));

    // Fraction and prefix are both optional
    assert_eq!(kind.convert("WT50"), Some(FieldValue::Float(50.0)));
    assert_eq!(kind.convert("50.5"), Some(FieldValue::Float(50.5)));

    assert_eq!(
        kind.is_legal("WT", reference_date()),
        vec![error_codes::BAD_FLOAT_VALUE]
    );
}

#[test]
fn test_height_prefixed_integer() {
    let kind = FieldKind::height();

    assert_eq!(kind.convert("HT170"), Some(FieldValue::Int(170)));
    assert_eq!(kind.convert("170"), Some(FieldValue::Int(170)));
    assert_eq!(
        kind.is_legal("HT170.5", reference_date()),
        vec![error_codes::BAD_NUMBERED_VALUE]
    );
}

#[test]
fn test_muac_requires_fraction() {
    let kind = FieldKind::muac();

    assert!(kind.is_legal("MUAC12.5", reference_date()).is_empty());
    assert_eq!(kind.convert("MUAC12.5"), Some(FieldValue::Float(12.5)));

    // Prefix is matched case-insensitively
    assert!(kind.is_legal("muac12.5", reference_date()).is_empty());

    assert_eq!(
        kind.is_legal("MUAC12", reference_date()),
        vec![error_codes::BAD_MUAC_VALUE]
    );
    assert_eq!(
        kind.is_legal("12.5", reference_date()),
        vec![error_codes::BAD_MUAC_VALUE]
    );
}

#[test]
fn test_expectation_membership() {
    let kind = FieldKind::symptom();

    assert!(kind.is_legal("CH", reference_date()).is_empty());
    assert_eq!(
        kind.is_legal("XX", reference_date()),
        vec![error_codes::BAD_SYMPTOM_CODE]
    );
}

#[test]
fn test_expectation_membership_is_case_insensitive() {
    let kind = FieldKind::location();

    assert!(kind.is_legal("HO", reference_date()).is_empty());
    assert!(kind.is_legal("ho", reference_date()).is_empty());
    assert_eq!(
        kind.is_legal("XQ", reference_date()),
        vec![error_codes::BAD_LOCATION_CODE]
    );
}

#[test]
fn test_expectations_are_deduplicated_sets() {
    let kind = FieldKind::pregnancy();
    let expected = kind.expectations().unwrap();

    assert_eq!(expected.len(), 14);
    assert!(expected.contains("NT"));
    assert!(expected.contains("GS"));
}

#[test]
fn test_nbc_visit_combines_shape_and_expectations() {
    let kind = FieldKind::nbc_visit();

    assert!(kind.is_legal("NBC2", reference_date()).is_empty());
    assert_eq!(kind.convert("NBC2"), Some(FieldValue::Int(2)));

    // Right shape, outside the expectation set
    assert_eq!(
        kind.is_legal("NBC6", reference_date()),
        vec![error_codes::BAD_NBC_VISIT]
    );
    // No trailing digit at all
    assert_eq!(
        kind.is_legal("EBF", reference_date()),
        vec![error_codes::BAD_NBC_VISIT]
    );
}

#[test]
fn test_vaccination_codes_convert_to_visit_numbers() {
    let kind = FieldKind::vaccination();

    assert!(kind.is_legal("V3", reference_date()).is_empty());
    assert_eq!(kind.convert("V3"), Some(FieldValue::Int(3)));
    assert_eq!(
        kind.is_legal("V7", reference_date()),
        vec![error_codes::BAD_VACCINATION_CODE]
    );
}

#[test]
fn test_breastfeeding_accepts_plain_codes() {
    let kind = FieldKind::breastfeeding();

    assert!(kind.is_legal("EBF", reference_date()).is_empty());
    assert!(kind.is_legal("CBF", reference_date()).is_empty());
    assert!(kind.is_legal("NB", reference_date()).is_empty());
    assert_eq!(
        kind.is_legal("XX", reference_date()),
        vec![error_codes::BAD_BREASTFEEDING_CODE]
    );
}

#[test]
fn test_illegal_token_yields_exactly_one_code() {
    // Fails shape, membership, and convertibility; only shape reports
    let kind = FieldKind::vaccination();
    assert_eq!(kind.is_legal("!!", reference_date()).len(), 1);
}
