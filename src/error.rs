//! Error types for schema validation
//!
//! One variant per violated rule, each carrying enough entity and field
//! context to generate actionable diagnostics.

use crate::models::enums::IndexKind;
use crate::validation::input::NameError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by the registry, resolver and index validator
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq)]
pub enum SchemaError {
    /// An entity with the same name is already registered
    #[error("entity '{0}' is already registered")]
    DuplicateEntity(String),

    /// A declaration references an entity that does not exist
    #[error("unknown entity '{0}'")]
    UnknownEntity(String),

    /// Registration was attempted after the registry was sealed
    #[error("registry is sealed: cannot register entity '{0}'")]
    RegistrySealed(String),

    /// A self-relation with a non-nullable foreign key cannot represent
    /// root records
    #[error(
        "self-relation on '{entity}' requires a nullable foreign key, but '{field}' is not nullable"
    )]
    InvalidSelfReference { entity: String, field: String },

    /// The declaration matches no supported relationship pattern, or
    /// conflicting declarations exist for the same entity pair
    #[error("ambiguous relationship between '{source_entity}' and '{target_entity}': {reason}")]
    AmbiguousRelationship {
        // Not `source`/`target`: thiserror reserves `source` for the
        // wrapped error cause.
        source_entity: String,
        target_entity: String,
        reason: String,
    },

    /// A declaration references a field missing from the entity
    #[error("unknown field '{field}' on entity '{entity}'")]
    UnknownField { entity: String, field: String },

    /// Index kind does not match the declared field count
    #[error("invalid {kind:?} index on '{entity}': {reason}")]
    InvalidIndexKind {
        entity: String,
        kind: IndexKind,
        reason: String,
    },

    /// Unique index over a field that already carries a uniqueness
    /// constraint; surfaced so duplicate intent is reported, never ignored
    #[error("redundant unique index on '{entity}.{field}': field already carries a uniqueness constraint")]
    RedundantIndex { entity: String, field: String },

    /// Full-text indexes accept text-typed fields only
    #[error("full-text index on '{entity}' references non-text field '{field}'")]
    InvalidIndexTarget { entity: String, field: String },

    /// The same index (entity, field sequence, kind) was declared twice
    #[error("duplicate index on '{entity}' over [{fields}]")]
    DuplicateIndex { entity: String, fields: String },

    /// Entity or field name violates the identifier rules
    #[error("invalid name: {0}")]
    InvalidName(#[from] NameError),
}

/// Result type for schema validation operations
pub type SchemaResult<T> = Result<T, SchemaError>;
