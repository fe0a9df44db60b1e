//! Field model

use super::enums::FieldType;
use serde::{Deserialize, Serialize};

/// Field model representing a typed member of an entity
///
/// A field defines a single typed value with nullability and uniqueness
/// constraints. Fields are immutable once the owning entity is registered;
/// the only later change is the uniqueness flag forced by a validated
/// unique index.
///
/// # Example
///
/// ```rust
/// use schema_modelling_core::models::{Field, enums::FieldType};
///
/// let field = Field::new("email".to_string(), FieldType::String);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Field {
    /// Field name, unique within the owning entity
    pub name: String,
    /// Logical type
    #[serde(rename = "type")]
    pub ty: FieldType,
    /// Whether the field allows missing values (default: true)
    #[serde(default = "default_true")]
    pub nullable: bool,
    /// Whether the field carries a uniqueness constraint (default: false)
    #[serde(default)]
    pub unique: bool,
}

fn default_true() -> bool {
    true
}

impl Field {
    /// Create a new field with the given name and type
    ///
    /// Defaults to nullable and non-unique, matching an unconstrained
    /// column declaration.
    pub fn new(name: String, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            nullable: true,
            unique: false,
        }
    }
}
