//! Index model

use super::enums::IndexKind;
use serde::{Deserialize, Serialize};

/// Validated index declared on an entity
///
/// Field order is the declared order; for compound indexes it is
/// significant and preserved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Index {
    /// Owning entity name
    pub entity: String,
    /// Indexed field names, in declared order (length >= 1)
    pub fields: Vec<String>,
    pub kind: IndexKind,
}

impl Index {
    pub fn new(entity: String, fields: Vec<String>, kind: IndexKind) -> Self {
        Self {
            entity,
            fields,
            kind,
        }
    }

    /// Whether another declaration targets the same field sequence and kind
    pub fn same_declaration(&self, fields: &[String], kind: IndexKind) -> bool {
        self.kind == kind && self.fields == fields
    }
}
