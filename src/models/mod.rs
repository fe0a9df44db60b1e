//! Models module
//!
//! Defines the core data structures of the validation pipeline: fields,
//! entities, relationships, indexes, and the parsed schema document that
//! external parsers hand over.

pub mod document;
pub mod entity;
pub mod enums;
pub mod field;
pub mod index;
pub mod relationship;

pub use document::{EntityDecl, IndexDecl, RelationshipDecl, SchemaDocument};
pub use entity::Entity;
pub use enums::*;
pub use field::Field;
pub use index::Index;
pub use relationship::Relationship;
