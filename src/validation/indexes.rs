//! Index validation
//!
//! Validates single, compound, unique and full-text index declarations
//! against a sealed registry. Every rule is checked before the entity's
//! index set is touched, so a rejected declaration never mutates state.

use crate::error::{SchemaError, SchemaResult};
use crate::models::enums::IndexKind;
use crate::models::Index;
use crate::registry::EntityRegistry;
use tracing::debug;

/// Index validator
#[derive(Debug, Default)]
pub struct IndexValidator;

impl IndexValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate an index declaration and attach it to the owning entity
    ///
    /// # Rules
    ///
    /// - every field name must resolve on the entity
    /// - more than one field requires the `Compound` kind, and `Compound`
    ///   requires more than one field
    /// - `Unique` targets a single field that is not already unique
    /// - `FullText` targets text-typed fields only
    /// - the same (entity, field sequence, kind) may be declared once
    pub fn declare(
        &self,
        registry: &mut EntityRegistry,
        entity_name: &str,
        fields: Vec<String>,
        kind: IndexKind,
    ) -> SchemaResult<Index> {
        let entity = registry.get(entity_name)?;

        if fields.is_empty() {
            return Err(SchemaError::InvalidIndexKind {
                entity: entity_name.to_string(),
                kind,
                reason: "an index requires at least one field".to_string(),
            });
        }

        for name in &fields {
            if entity.field(name).is_none() {
                return Err(SchemaError::UnknownField {
                    entity: entity_name.to_string(),
                    field: name.clone(),
                });
            }
        }

        if fields.len() > 1 && kind != IndexKind::Compound {
            return Err(SchemaError::InvalidIndexKind {
                entity: entity_name.to_string(),
                kind,
                reason: format!("{} fields declared, only Compound spans several", fields.len()),
            });
        }
        if fields.len() == 1 && kind == IndexKind::Compound {
            return Err(SchemaError::InvalidIndexKind {
                entity: entity_name.to_string(),
                kind,
                reason: "a compound index requires more than one field".to_string(),
            });
        }

        if kind == IndexKind::Unique {
            // len == 1 is guaranteed by the arity rules above.
            if let Some(field) = entity.field(&fields[0])
                && field.unique
            {
                return Err(SchemaError::RedundantIndex {
                    entity: entity_name.to_string(),
                    field: fields[0].clone(),
                });
            }
        }

        if kind == IndexKind::FullText {
            for name in &fields {
                if let Some(field) = entity.field(name)
                    && !field.ty.is_text()
                {
                    return Err(SchemaError::InvalidIndexTarget {
                        entity: entity_name.to_string(),
                        field: name.clone(),
                    });
                }
            }
        }

        if entity
            .indexes
            .iter()
            .any(|idx| idx.same_declaration(&fields, kind))
        {
            return Err(SchemaError::DuplicateIndex {
                entity: entity_name.to_string(),
                fields: fields.join(", "),
            });
        }

        let index = Index::new(entity_name.to_string(), fields, kind);
        debug!(
            "validated {:?} index on '{}' over [{}]",
            kind,
            entity_name,
            index.fields.join(", ")
        );

        let Some(entity) = registry.entity_mut(entity_name) else {
            return Err(SchemaError::UnknownEntity(entity_name.to_string()));
        };
        if kind == IndexKind::Unique {
            // The declaration forces the uniqueness constraint onto the
            // field in the normalized output.
            if let Some(field) = entity.field_mut(&index.fields[0]) {
                field.unique = true;
            }
        }
        entity.indexes.push(index.clone());
        entity.touch();
        Ok(index)
    }
}
