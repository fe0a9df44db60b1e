//! Pipeline and normalized-graph tests

use schema_modelling_core::models::enums::{FieldType, IndexKind, RelationshipKind};
use schema_modelling_core::models::{EntityDecl, Field, IndexDecl, RelationshipDecl};
use schema_modelling_core::{
    SchemaDocument, SchemaError, SchemaGraph, SchemaValidator, ValidationMode,
};

fn field(name: &str, ty: FieldType) -> Field {
    Field::new(name.to_string(), ty)
}

fn unique_field(name: &str, ty: FieldType) -> Field {
    let mut f = field(name, ty);
    f.unique = true;
    f
}

/// A small blog-shaped document: users own posts, posts belong to
/// categories via a junction, and a couple of indexes.
fn blog_document() -> SchemaDocument {
    SchemaDocument {
        entities: vec![
            EntityDecl::new(
                "User".to_string(),
                vec![
                    unique_field("id", FieldType::Number),
                    unique_field("email", FieldType::String),
                    field("name", FieldType::String),
                ],
            ),
            EntityDecl::new(
                "Post".to_string(),
                vec![
                    unique_field("id", FieldType::Number),
                    field("title", FieldType::String),
                    field("body", FieldType::String),
                    field("authorId", FieldType::Reference),
                ],
            ),
            EntityDecl::new(
                "Category".to_string(),
                vec![
                    unique_field("id", FieldType::Number),
                    field("name", FieldType::String),
                ],
            ),
        ],
        relationships: vec![
            RelationshipDecl::foreign_key(
                "Post".to_string(),
                "User".to_string(),
                "authorId".to_string(),
                false,
            ),
            RelationshipDecl::collections("Post".to_string(), "Category".to_string()),
        ],
        indexes: vec![
            IndexDecl::new(
                "Post".to_string(),
                vec!["title".to_string()],
                IndexKind::Single,
            ),
            IndexDecl::new(
                "Post".to_string(),
                vec!["title".to_string(), "body".to_string()],
                IndexKind::Compound,
            ),
            IndexDecl::new(
                "Post".to_string(),
                vec!["body".to_string()],
                IndexKind::FullText,
            ),
        ],
    }
}

mod pipeline_tests {
    use super::*;

    #[test]
    fn test_clean_document_validates() {
        let outcome = SchemaValidator::new().validate(&blog_document()).unwrap();
        assert!(outcome.is_valid());

        let graph = outcome.graph;
        // Three declared entities plus the materialized junction
        assert_eq!(graph.entities.len(), 4);
        assert_eq!(graph.relationships.len(), 2);
        assert_eq!(graph.relationships[0].kind, RelationshipKind::OneToMany);
        assert_eq!(graph.relationships[1].kind, RelationshipKind::ManyToMany);

        let junction = graph.entity("category_post").unwrap();
        assert!(junction.generated);

        let post = graph.entity("Post").unwrap();
        assert_eq!(post.indexes.len(), 3);
    }

    #[test]
    fn test_collect_mode_surfaces_every_error() {
        let mut doc = blog_document();
        // Duplicate entity, bad relationship target, bad index field
        doc.entities.push(EntityDecl::new("User".to_string(), vec![]));
        doc.relationships.push(RelationshipDecl::foreign_key(
            "Post".to_string(),
            "Ghost".to_string(),
            "authorId".to_string(),
            false,
        ));
        doc.indexes.push(IndexDecl::new(
            "User".to_string(),
            vec!["missing".to_string()],
            IndexKind::Single,
        ));

        let outcome = SchemaValidator::new().validate(&doc).unwrap();
        assert_eq!(outcome.errors.len(), 3);
        assert!(matches!(outcome.errors[0], SchemaError::DuplicateEntity(..)));
        assert!(matches!(outcome.errors[1], SchemaError::UnknownEntity(..)));
        assert!(matches!(outcome.errors[2], SchemaError::UnknownField { .. }));

        // The rest of the document still normalized
        assert_eq!(outcome.graph.relationships.len(), 2);
    }

    #[test]
    fn test_fail_fast_mode_stops_at_first_error() {
        let mut doc = blog_document();
        doc.entities.push(EntityDecl::new("User".to_string(), vec![]));
        doc.indexes.push(IndexDecl::new(
            "User".to_string(),
            vec!["missing".to_string()],
            IndexKind::Single,
        ));

        let result = SchemaValidator::with_mode(ValidationMode::FailFast).validate(&doc);
        assert!(matches!(result, Err(SchemaError::DuplicateEntity(..))));
    }

    #[test]
    fn test_validate_strict_returns_graph_for_clean_document() {
        let graph = SchemaValidator::new()
            .validate_strict(&blog_document())
            .unwrap();
        assert_eq!(graph.entities.len(), 4);
    }

    #[test]
    fn test_forward_references_resolve() {
        // Relationship declared against an entity that appears later in
        // the document; the two-pass pipeline must resolve it.
        let doc = SchemaDocument {
            entities: vec![
                EntityDecl::new(
                    "Profile".to_string(),
                    vec![unique_field("userId", FieldType::Reference)],
                ),
                EntityDecl::new(
                    "User".to_string(),
                    vec![unique_field("id", FieldType::Number)],
                ),
            ],
            relationships: vec![RelationshipDecl::foreign_key(
                "Profile".to_string(),
                "User".to_string(),
                "userId".to_string(),
                true,
            )],
            indexes: vec![],
        };

        let outcome = SchemaValidator::new().validate(&doc).unwrap();
        assert!(outcome.is_valid());
        assert_eq!(outcome.graph.relationships[0].kind, RelationshipKind::OneToOne);
    }
}

mod graph_tests {
    use super::*;

    fn validated_graph() -> SchemaGraph {
        SchemaValidator::new()
            .validate_strict(&blog_document())
            .unwrap()
    }

    #[test]
    fn test_json_round_trip_preserves_classification() -> anyhow::Result<()> {
        let graph = validated_graph();
        let json = graph.to_json()?;
        let reloaded = SchemaGraph::from_json(&json)?;

        assert_eq!(graph, reloaded);
        for (a, b) in graph.relationships.iter().zip(&reloaded.relationships) {
            assert_eq!(a.kind, b.kind);
        }
        for (a, b) in graph.entities.iter().zip(&reloaded.entities) {
            assert_eq!(a.indexes, b.indexes);
        }
        Ok(())
    }

    #[test]
    fn test_yaml_round_trip() -> anyhow::Result<()> {
        let graph = validated_graph();
        let yaml = graph.to_yaml()?;
        let reloaded = SchemaGraph::from_yaml(&yaml)?;
        assert_eq!(graph, reloaded);
        Ok(())
    }

    #[test]
    fn test_relationship_lookups() {
        let graph = validated_graph();

        let user_rels = graph.relationships_of("User");
        assert_eq!(user_rels.len(), 1);
        assert_eq!(user_rels[0].kind, RelationshipKind::OneToMany);

        let post_rels = graph.relationships_of("Post");
        assert_eq!(post_rels.len(), 2);

        let referencing = graph.referencing("User");
        assert_eq!(referencing.len(), 1);
        assert_eq!(referencing[0].source, "Post");
    }

    #[test]
    fn test_dependency_order() {
        let graph = validated_graph();
        let order = graph.dependency_order().unwrap();

        let pos = |name: &str| order.iter().position(|n| n == name).unwrap();
        // FK targets come before their holders, junctions after both sides
        assert!(pos("User") < pos("Post"));
        assert!(pos("Post") < pos("category_post"));
        assert!(pos("Category") < pos("category_post"));
    }

    #[test]
    fn test_self_relation_does_not_break_ordering() {
        let doc = SchemaDocument {
            entities: vec![EntityDecl::new(
                "Employee".to_string(),
                vec![
                    unique_field("id", FieldType::Number),
                    field("managerId", FieldType::Reference),
                ],
            )],
            relationships: vec![RelationshipDecl::foreign_key(
                "Employee".to_string(),
                "Employee".to_string(),
                "managerId".to_string(),
                false,
            )],
            indexes: vec![],
        };
        let graph = SchemaValidator::new().validate_strict(&doc).unwrap();
        let order = graph.dependency_order().unwrap();
        assert_eq!(order, vec!["Employee".to_string()]);
    }

    #[test]
    fn test_cycle_is_reported_with_path() {
        let doc = SchemaDocument {
            entities: vec![
                EntityDecl::new(
                    "A".to_string(),
                    vec![field("bId", FieldType::Reference)],
                ),
                EntityDecl::new(
                    "B".to_string(),
                    vec![field("aId", FieldType::Reference)],
                ),
            ],
            relationships: vec![
                RelationshipDecl::foreign_key(
                    "A".to_string(),
                    "B".to_string(),
                    "bId".to_string(),
                    false,
                ),
                RelationshipDecl::foreign_key(
                    "B".to_string(),
                    "A".to_string(),
                    "aId".to_string(),
                    false,
                ),
            ],
            indexes: vec![],
        };
        let graph = SchemaValidator::new().validate_strict(&doc).unwrap();

        let err = graph.dependency_order().unwrap_err();
        assert!(err.path.len() >= 2);
        assert_eq!(err.path.first(), err.path.last());
    }
}
