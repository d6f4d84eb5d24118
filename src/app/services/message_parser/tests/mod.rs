//! Test utilities and fixtures for message parser testing
//!
//! This module provides common helpers shared across the parser test
//! modules: a fixed reference date and spec builders.

use chrono::NaiveDate;
use std::sync::Arc;

use super::field_kind::FieldKind;
use super::field_spec::FieldSpec;

mod field_kind_tests;

/// Fixed reference date used across parser tests
pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 6, 1).unwrap()
}

/// Helper to build a non-repeatable spec around a kind
pub fn single(kind: FieldKind) -> FieldSpec {
    FieldSpec::single(Arc::new(kind))
}

/// Helper to build a repeatable spec around a kind
pub fn many(kind: FieldKind) -> FieldSpec {
    FieldSpec::many(Arc::new(kind))
}
