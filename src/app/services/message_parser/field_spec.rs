//! Schema building blocks pairing a field kind with repeatability
//!
//! A schema position is a field kind plus a flag saying whether the
//! position greedily accepts consecutive tokens of that kind. Specs are
//! declared once at startup and shared immutably.

use std::sync::Arc;

use super::field_kind::FieldKind;

/// One position in a message schema
#[derive(Debug, Clone)]
pub struct FieldSpec {
    kind: Arc<FieldKind>,
    repeatable: bool,
}

impl FieldSpec {
    /// A position consuming exactly one token
    pub fn single(kind: Arc<FieldKind>) -> Self {
        Self {
            kind,
            repeatable: false,
        }
    }

    /// A position consuming zero or more consecutive tokens of the kind
    pub fn many(kind: Arc<FieldKind>) -> Self {
        Self {
            kind,
            repeatable: true,
        }
    }

    /// The kind governing this position
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Whether this position matches greedily
    pub fn is_repeatable(&self) -> bool {
        self.repeatable
    }
}
