//! Parsed schema document
//!
//! The input contract of the core: an already-parsed, in-memory description
//! of entities, relationship declarations and index declarations, handed
//! over by an external parser. Forward references between declarations are
//! allowed; resolution is two-pass.

use super::enums::IndexKind;
use super::field::Field;
use serde::{Deserialize, Serialize};

/// One schema document, validated as a batch
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchemaDocument {
    #[serde(default)]
    pub entities: Vec<EntityDecl>,
    #[serde(default)]
    pub relationships: Vec<RelationshipDecl>,
    #[serde(default)]
    pub indexes: Vec<IndexDecl>,
}

/// Declared entity: a name plus its ordered fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntityDecl {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl EntityDecl {
    pub fn new(name: String, fields: Vec<Field>) -> Self {
        Self { name, fields }
    }
}

/// Declared relationship, prior to classification
///
/// Exactly one shape should be present: a foreign-key field on the source,
/// mutual collection flags, or an explicit join entity. Mixing shapes is
/// reported as ambiguous by the resolver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelationshipDecl {
    pub source: String,
    pub target: String,
    /// Foreign-key field held by the source entity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<String>,
    /// Declared uniqueness of the foreign key; must agree with the field's
    /// own constraint
    #[serde(default)]
    pub foreign_key_unique: bool,
    /// Source declares a collection of the target
    #[serde(default)]
    pub source_collection: bool,
    /// Target declares a collection of the source
    #[serde(default)]
    pub target_collection: bool,
    /// Explicit junction entity carrying foreign keys to both sides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_entity: Option<String>,
}

impl RelationshipDecl {
    /// Declaration carried by a foreign-key field on the source entity
    pub fn foreign_key(
        source: String,
        target: String,
        field: String,
        unique: bool,
    ) -> Self {
        Self {
            source,
            target,
            foreign_key: Some(field),
            foreign_key_unique: unique,
            source_collection: false,
            target_collection: false,
            join_entity: None,
        }
    }

    /// Declaration via mutual collection fields (implicit junction)
    pub fn collections(source: String, target: String) -> Self {
        Self {
            source,
            target,
            foreign_key: None,
            foreign_key_unique: false,
            source_collection: true,
            target_collection: true,
            join_entity: None,
        }
    }

    /// Declaration via an explicit junction entity
    pub fn with_join_entity(source: String, target: String, join_entity: String) -> Self {
        Self {
            source,
            target,
            foreign_key: None,
            foreign_key_unique: false,
            source_collection: true,
            target_collection: true,
            join_entity: Some(join_entity),
        }
    }
}

/// Declared index, prior to validation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexDecl {
    pub entity: String,
    pub fields: Vec<String>,
    pub kind: IndexKind,
}

impl IndexDecl {
    pub fn new(entity: String, fields: Vec<String>, kind: IndexKind) -> Self {
        Self {
            entity,
            fields,
            kind,
        }
    }
}
