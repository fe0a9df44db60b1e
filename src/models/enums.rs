//! Enumerations shared across the schema models

use serde::{Deserialize, Serialize};

/// Logical type of a field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Text data; the only type accepted by full-text indexes
    String,
    Number,
    Boolean,
    DateTime,
    /// Holds the identity of a record in another entity (foreign key)
    Reference,
}

impl FieldType {
    /// Whether the type carries text (full-text indexable)
    pub fn is_text(self) -> bool {
        matches!(self, FieldType::String)
    }
}

/// Classified kind of a relationship between two entities
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    OneToOne,
    /// The foreign-key holding entity is the "many" side
    OneToMany,
    ManyToMany,
    SelfReference,
    ManyToManyWithAttributes,
}

/// Kind of a declared index
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum IndexKind {
    Single,
    Compound,
    Unique,
    FullText,
}
