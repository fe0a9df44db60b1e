//! Entity model

use super::field::Field;
use super::index::Index;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entity model: a named, ordered collection of typed fields
///
/// Field order is insertion order and is preserved through serialization so
/// downstream generators see deterministic output. Relationships are owned
/// by the resolver's table; an entity only holds indices into that table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entity {
    pub id: Uuid,
    pub name: String,
    pub fields: Vec<Field>,
    /// Back-references into the relationship table (not ownership)
    #[serde(default)]
    pub relationships: Vec<usize>,
    /// Validated indexes declared on this entity
    #[serde(default)]
    pub indexes: Vec<Index>,
    /// True for junction entities materialized by the resolver
    #[serde(default)]
    pub generated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity {
    pub fn new(name: String, fields: Vec<Field>) -> Self {
        let now = Utc::now();
        // Deterministic UUID v5 based on the entity name (no randomness needed)
        let id = Self::generate_id(&name);
        Self {
            id,
            name,
            fields,
            relationships: Vec::new(),
            indexes: Vec::new(),
            generated: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Generate a deterministic UUID v5 for an entity based on its name
    ///
    /// The same name always yields the same id, so ids survive a
    /// serialize/reload round trip.
    pub fn generate_id(name: &str) -> Uuid {
        Uuid::new_v5(&Uuid::NAMESPACE_DNS, name.as_bytes())
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub(crate) fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Record a mutation of the entity's normalized state
    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
