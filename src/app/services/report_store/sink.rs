//! Storage sink contract and the in-memory reference implementation

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::app::models::FieldValue;
use crate::{Error, Result};

/// A value stored in one attribute column
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    Bool(bool),
    /// Generated id of another row (the auxiliary → principal reference)
    Id(i64),
}

impl From<&FieldValue> for AttributeValue {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::Text(s) => AttributeValue::Text(s.clone()),
            FieldValue::Int(n) => AttributeValue::Int(*n),
            FieldValue::Float(f) => AttributeValue::Float(*f),
            FieldValue::Date(d) => AttributeValue::Date(*d),
        }
    }
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeValue::Text(s) => write!(f, "{}", s),
            AttributeValue::Int(n) => write!(f, "{}", n),
            AttributeValue::Float(v) => write!(f, "{}", v),
            AttributeValue::Date(d) => write!(f, "{}", d),
            AttributeValue::Bool(b) => write!(f, "{}", b),
            AttributeValue::Id(id) => write!(f, "{}", id),
        }
    }
}

/// Generic storage sink for parsed reports
///
/// `store` persists one row of attributes under an entity name and
/// returns the generated row id. Implementations own their storage
/// layout, connection lifecycle, and the serialization of any shared
/// mutable state; the parse core imposes nothing beyond this contract.
pub trait ReportSink: Send + Sync {
    fn store(&self, entity: &str, attributes: &[(String, AttributeValue)]) -> Result<i64>;
}

/// In-memory sink used by tests and dry demonstrations
///
/// Rows are kept per entity; generated ids count up from 1 within each
/// entity.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, Vec<HashMap<String, AttributeValue>>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows stored under an entity
    pub fn row_count(&self, entity: &str) -> usize {
        self.tables
            .lock()
            .map(|tables| tables.get(entity).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    /// Snapshot of the rows stored under an entity
    pub fn rows(&self, entity: &str) -> Vec<HashMap<String, AttributeValue>> {
        self.tables
            .lock()
            .map(|tables| tables.get(entity).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    /// Names of entities that received at least one row, sorted
    pub fn entity_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .tables
            .lock()
            .map(|tables| tables.keys().cloned().collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }
}

impl ReportSink for MemoryStore {
    fn store(&self, entity: &str, attributes: &[(String, AttributeValue)]) -> Result<i64> {
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| Error::storage("memory store lock poisoned"))?;

        let rows = tables.entry(entity.to_string()).or_default();
        rows.push(attributes.iter().cloned().collect());
        Ok(rows.len() as i64)
    }
}
