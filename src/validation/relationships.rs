//! Relationship resolution and classification
//!
//! Consumes a sealed registry and classifies declared relationships into
//! one-to-one, one-to-many, many-to-many, self-referencing, or
//! many-to-many with attributes. Implicit many-to-many declarations
//! materialize a junction entity so downstream consumers always see
//! concrete entities.

use crate::error::{SchemaError, SchemaResult};
use crate::models::enums::{FieldType, RelationshipKind};
use crate::models::{Entity, Field, Relationship, RelationshipDecl};
use crate::registry::EntityRegistry;
use std::collections::HashMap;
use tracing::debug;

/// Classifies relationship declarations against a sealed registry
///
/// The resolver's table is the canonical owner of every relationship;
/// entities only carry indices into it.
#[derive(Debug, Default)]
pub struct RelationshipResolver {
    relationships: Vec<Relationship>,
    // Ordered (source, target) pairs -> indices of prior declarations,
    // used to surface conflicting re-declarations.
    declared: HashMap<(String, String), Vec<usize>>,
}

impl RelationshipResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify and register a relationship declaration
    ///
    /// On success the relationship is appended to the resolver's table and
    /// back-referenced on both participating entities.
    pub fn declare(
        &mut self,
        registry: &mut EntityRegistry,
        decl: &RelationshipDecl,
    ) -> SchemaResult<RelationshipKind> {
        registry.get(&decl.source)?;
        registry.get(&decl.target)?;

        if decl.foreign_key.is_some() && decl.join_entity.is_some() {
            return Err(self.ambiguous(decl, "both a foreign key and a join entity declared"));
        }

        let (kind, foreign_key, join_entity) = if decl.source == decl.target {
            (
                self.classify_self(registry, decl)?,
                decl.foreign_key.clone(),
                None,
            )
        } else if let Some(fk) = &decl.foreign_key {
            (
                self.classify_foreign_key(registry, decl, fk)?,
                Some(fk.clone()),
                None,
            )
        } else if let Some(join) = &decl.join_entity {
            self.reject_foreign_key_prior(decl)?;
            (
                self.classify_join(registry, decl, join)?,
                None,
                Some(join.clone()),
            )
        } else if decl.source_collection && decl.target_collection {
            self.reject_foreign_key_prior(decl)?;
            let junction = self.materialize_junction(registry, decl)?;
            (RelationshipKind::ManyToMany, None, Some(junction))
        } else {
            return Err(self.ambiguous(decl, "declaration matches no supported pattern"));
        };

        let relationship = Relationship::new(
            decl.source.clone(),
            decl.target.clone(),
            kind,
            foreign_key,
            join_entity,
        );
        debug!(
            "classified relationship {} -> {} as {:?}",
            decl.source, decl.target, kind
        );

        let index = self.relationships.len();
        self.relationships.push(relationship);
        self.declared
            .entry((decl.source.clone(), decl.target.clone()))
            .or_default()
            .push(index);

        // Symmetric back-references; the table entry stays the single owner.
        registry.attach_relationship(&decl.source, index);
        if decl.source != decl.target {
            registry.attach_relationship(&decl.target, index);
        }

        Ok(kind)
    }

    /// Declaration carried by a foreign-key field, mirroring the
    /// four-argument contract used by parsers that only track direct keys.
    pub fn declare_foreign_key(
        &mut self,
        registry: &mut EntityRegistry,
        source: &str,
        target: &str,
        foreign_key: &str,
        unique: bool,
    ) -> SchemaResult<RelationshipKind> {
        let decl = RelationshipDecl::foreign_key(
            source.to_string(),
            target.to_string(),
            foreign_key.to_string(),
            unique,
        );
        self.declare(registry, &decl)
    }

    /// Relationships resolved so far, in declaration order
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn into_relationships(self) -> Vec<Relationship> {
        self.relationships
    }

    fn classify_self(
        &self,
        registry: &EntityRegistry,
        decl: &RelationshipDecl,
    ) -> SchemaResult<RelationshipKind> {
        let fk = decl
            .foreign_key
            .as_deref()
            .ok_or_else(|| self.ambiguous(decl, "self-relation requires a foreign-key field"))?;
        let entity = registry.get(&decl.source)?;
        let field = entity.field(fk).ok_or_else(|| SchemaError::UnknownField {
            entity: entity.name.clone(),
            field: fk.to_string(),
        })?;

        // Root records carry no parent, so the key must allow absence.
        if !field.nullable {
            return Err(SchemaError::InvalidSelfReference {
                entity: entity.name.clone(),
                field: fk.to_string(),
            });
        }
        Ok(RelationshipKind::SelfReference)
    }

    fn classify_foreign_key(
        &self,
        registry: &EntityRegistry,
        decl: &RelationshipDecl,
        fk: &str,
    ) -> SchemaResult<RelationshipKind> {
        if decl.source_collection && decl.target_collection {
            return Err(self.ambiguous(decl, "foreign key declared alongside mutual collections"));
        }

        let entity = registry.get(&decl.source)?;
        let field = entity.field(fk).ok_or_else(|| SchemaError::UnknownField {
            entity: entity.name.clone(),
            field: fk.to_string(),
        })?;

        if decl.foreign_key_unique != field.unique {
            return Err(self.ambiguous(
                decl,
                "declared foreign-key uniqueness disagrees with the field's constraint",
            ));
        }

        let kind = if field.unique {
            RelationshipKind::OneToOne
        } else {
            RelationshipKind::OneToMany
        };

        // A unique and a non-unique key declared for the same ordered pair
        // cannot both hold.
        if let Some(prior) = self
            .declared
            .get(&(decl.source.clone(), decl.target.clone()))
        {
            for &idx in prior {
                let existing = &self.relationships[idx];
                let conflicting = matches!(
                    (existing.kind, kind),
                    (RelationshipKind::OneToOne, RelationshipKind::OneToMany)
                        | (RelationshipKind::OneToMany, RelationshipKind::OneToOne)
                );
                if conflicting {
                    return Err(self.ambiguous(
                        decl,
                        "both a unique and a non-unique foreign key declared for this pair",
                    ));
                }
            }
        }

        // A foreign key cannot coexist with a many-to-many declared for the
        // same pair, in either direction.
        let collection_prior = self.prior_kinds(&decl.source, &decl.target).any(|k| {
            matches!(
                k,
                RelationshipKind::ManyToMany | RelationshipKind::ManyToManyWithAttributes
            )
        });
        if collection_prior {
            return Err(self.ambiguous(
                decl,
                "a collection relationship is already declared for this pair",
            ));
        }

        Ok(kind)
    }

    /// Kinds of every prior relationship between the pair, both directions
    fn prior_kinds<'a>(&'a self, a: &str, b: &str) -> impl Iterator<Item = RelationshipKind> + 'a {
        let forward = self.declared.get(&(a.to_string(), b.to_string()));
        let reverse = self.declared.get(&(b.to_string(), a.to_string()));
        forward
            .into_iter()
            .chain(reverse)
            .flatten()
            .map(|&idx| self.relationships[idx].kind)
    }

    fn reject_foreign_key_prior(&self, decl: &RelationshipDecl) -> SchemaResult<()> {
        let fk_prior = self.prior_kinds(&decl.source, &decl.target).any(|k| {
            matches!(
                k,
                RelationshipKind::OneToOne | RelationshipKind::OneToMany
            )
        });
        if fk_prior {
            return Err(self.ambiguous(
                decl,
                "a foreign-key relationship is already declared for this pair",
            ));
        }
        Ok(())
    }

    fn classify_join(
        &self,
        registry: &EntityRegistry,
        decl: &RelationshipDecl,
        join: &str,
    ) -> SchemaResult<RelationshipKind> {
        let join_entity = registry.get(join)?;

        let source_fk = junction_field_name(&decl.source);
        let target_fk = junction_field_name(&decl.target);
        for fk in [&source_fk, &target_fk] {
            match join_entity.field(fk) {
                Some(field) if field.ty == FieldType::Reference => {}
                Some(_) => {
                    return Err(self.ambiguous(
                        decl,
                        &format!("join entity field '{}' is not a reference", fk),
                    ));
                }
                None => {
                    return Err(SchemaError::UnknownField {
                        entity: join_entity.name.clone(),
                        field: fk.clone(),
                    });
                }
            }
        }

        let extra_fields = join_entity
            .fields
            .iter()
            .filter(|f| f.name != source_fk && f.name != target_fk)
            .count();

        if extra_fields >= 1 {
            Ok(RelationshipKind::ManyToManyWithAttributes)
        } else {
            // A bare junction adds nothing over the implicit form, but it
            // is still a plain many-to-many.
            Ok(RelationshipKind::ManyToMany)
        }
    }

    /// Build the junction entity for an implicit many-to-many and insert it
    /// into the registry, returning its name.
    fn materialize_junction(
        &self,
        registry: &mut EntityRegistry,
        decl: &RelationshipDecl,
    ) -> SchemaResult<String> {
        let (a, b) = if decl.source <= decl.target {
            (&decl.source, &decl.target)
        } else {
            (&decl.target, &decl.source)
        };
        let name = format!("{}_{}", a.to_lowercase(), b.to_lowercase());

        if let Ok(existing) = registry.get(&name) {
            if existing.generated {
                // Same pair declared again; reuse the junction.
                return Ok(name);
            }
            return Err(SchemaError::DuplicateEntity(name));
        }

        let mut fields = Vec::with_capacity(2);
        for side in [a, b] {
            let mut field = Field::new(junction_field_name(side), FieldType::Reference);
            field.nullable = false;
            fields.push(field);
        }
        let junction = Entity::new(name.clone(), fields);
        registry.insert_generated(junction);
        debug!("materialized junction entity '{}'", name);
        Ok(name)
    }

    fn ambiguous(&self, decl: &RelationshipDecl, reason: &str) -> SchemaError {
        SchemaError::AmbiguousRelationship {
            source_entity: decl.source.clone(),
            target_entity: decl.target.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Conventional foreign-key field name on a junction entity
pub fn junction_field_name(entity: &str) -> String {
    format!("{}_id", entity.to_lowercase())
}
