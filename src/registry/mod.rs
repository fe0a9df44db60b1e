//! Entity registry
//!
//! First pass of the pipeline: entities are registered with their fields,
//! then the registry is sealed as a batch. Relationship resolution and
//! index validation only run against a sealed registry, so forward
//! references between declarations resolve naturally.

use crate::error::{SchemaError, SchemaResult};
use crate::models::{Entity, Field};
use crate::validation::input::{self, NameError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

/// Opaque handle to a registered entity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EntityId(pub Uuid);

/// Holds entity definitions for one schema document
///
/// Not safe for concurrent mutation; a document is validated on a single
/// logical task.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
    by_name: HashMap<String, usize>,
    sealed: bool,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity with its ordered fields
    ///
    /// Fails without mutating the registry: a rejected registration leaves
    /// the registry exactly as it was before the call.
    pub fn register(&mut self, name: String, fields: Vec<Field>) -> SchemaResult<EntityId> {
        if self.sealed {
            return Err(SchemaError::RegistrySealed(name));
        }

        input::validate_entity_name(&name)?;
        for field in &fields {
            input::validate_field_name(&field.name)?;
        }
        let mut seen = std::collections::HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(NameError::DuplicateField {
                    entity: name,
                    field: field.name.clone(),
                }
                .into());
            }
        }

        if self.by_name.contains_key(&name) {
            return Err(SchemaError::DuplicateEntity(name));
        }

        let entity = Entity::new(name.clone(), fields);
        let id = EntityId(entity.id);
        self.by_name.insert(name, self.entities.len());
        self.entities.push(entity);
        Ok(id)
    }

    /// Look up an entity by name
    pub fn get(&self, name: &str) -> SchemaResult<&Entity> {
        self.by_name
            .get(name)
            .map(|&idx| &self.entities[idx])
            .ok_or_else(|| SchemaError::UnknownEntity(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Registered entities, in registration order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Freeze registration. Idempotent: sealing a sealed registry is a
    /// no-op.
    pub fn seal_all(&mut self) {
        if !self.sealed {
            self.sealed = true;
            debug!("sealed registry with {} entities", self.entities.len());
        }
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn into_entities(self) -> Vec<Entity> {
        self.entities
    }

    /// Insert a junction entity materialized by the resolver.
    ///
    /// Runs post-seal on purpose: generated entities are resolver output,
    /// not caller registrations.
    pub(crate) fn insert_generated(&mut self, mut entity: Entity) -> usize {
        entity.generated = true;
        let idx = self.entities.len();
        self.by_name.insert(entity.name.clone(), idx);
        self.entities.push(entity);
        idx
    }

    /// Attach a back-reference into the relationship table on an entity.
    pub(crate) fn attach_relationship(&mut self, name: &str, rel_index: usize) {
        if let Some(&idx) = self.by_name.get(name) {
            self.entities[idx].relationships.push(rel_index);
            self.entities[idx].touch();
        }
    }

    pub(crate) fn entity_mut(&mut self, name: &str) -> Option<&mut Entity> {
        let idx = *self.by_name.get(name)?;
        Some(&mut self.entities[idx])
    }
}
