//! Relationship model

use super::enums::RelationshipKind;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Classified relationship between two entities
///
/// Relationships are owned by the resolver's table; participating entities
/// hold indices into that table as back-references.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Relationship {
    pub id: Uuid,
    /// Entity holding the foreign key (the "many" side for one-to-many)
    pub source: String,
    pub target: String,
    pub kind: RelationshipKind,
    /// Foreign-key field on the source entity, when the relationship is
    /// carried by a direct foreign key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<String>,
    /// Junction entity name for many-to-many relationships, whether
    /// declared explicitly or materialized by the resolver
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_entity: Option<String>,
}

impl Relationship {
    pub fn new(
        source: String,
        target: String,
        kind: RelationshipKind,
        foreign_key: Option<String>,
        join_entity: Option<String>,
    ) -> Self {
        let id = Self::generate_id(&source, &target, foreign_key.as_deref());
        Self {
            id,
            source,
            target,
            kind,
            foreign_key,
            join_entity,
        }
    }

    /// Generate a deterministic UUID v5 for a relationship from its
    /// endpoints and carrying field
    ///
    /// Direction matters (the source is the foreign-key holder), so the key
    /// is not endpoint-sorted.
    pub fn generate_id(source: &str, target: &str, foreign_key: Option<&str>) -> Uuid {
        let key = format!("{}:{}:{}", source, target, foreign_key.unwrap_or(""));
        Uuid::new_v5(&Uuid::NAMESPACE_URL, key.as_bytes())
    }
}
