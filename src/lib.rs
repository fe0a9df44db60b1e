//! Schema Modelling Core - relationship and index validation for entity schemas
//!
//! Provides unified interfaces for:
//! - Entity and field registration with batch sealing
//! - Relationship classification (one-to-one, one-to-many, many-to-many,
//!   self-referencing, many-to-many with attributes)
//! - Index validation (single, compound, unique, full-text)
//! - A normalized, serializable schema graph for query layers and
//!   migration generators
//!
//! The core accepts an already-parsed, in-memory [`SchemaDocument`];
//! parsing any textual schema language is an external concern, as is
//! generating DDL from the resulting [`SchemaGraph`].

pub mod error;
pub mod graph;
pub mod models;
pub mod registry;
pub mod validation;

// Re-export commonly used types
pub use error::{SchemaError, SchemaResult};
pub use graph::{CycleError, SchemaGraph};

// Re-export models
pub use models::enums::{FieldType, IndexKind, RelationshipKind};
pub use models::{
    Entity, EntityDecl, Field, Index, IndexDecl, Relationship, RelationshipDecl, SchemaDocument,
};

// Re-export the registry and validators
pub use registry::{EntityId, EntityRegistry};
pub use validation::{
    IndexValidator, RelationshipResolver, SchemaValidator, ValidationMode, ValidationOutcome,
    ValidationReport,
};
