//! Normalized schema graph
//!
//! The output contract of the validation pipeline: concrete entities
//! (materialized junctions included), the relationship table, and the
//! validated indexes attached to their entities. Serializable, and
//! round-trip stable: reloading a serialized graph yields the same
//! relationship kinds and index sets.

use crate::models::enums::RelationshipKind;
use crate::models::{Entity, Relationship};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::algo::toposort;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use thiserror::Error;

/// The foreign-key reference graph contains a cycle, so no dependency
/// order exists
#[derive(Debug, Clone, Error, PartialEq)]
#[error("reference cycle detected: {}", .path.join(" -> "))]
pub struct CycleError {
    /// Entity names along the cycle, starting and ending at the same entity
    pub path: Vec<String>,
}

/// Normalized, validated schema graph
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchemaGraph {
    /// Entities in registration order, generated junctions last
    pub entities: Vec<Entity>,
    /// Canonical relationship table; entity back-references index into it
    pub relationships: Vec<Relationship>,
}

impl SchemaGraph {
    pub fn from_parts(entities: Vec<Entity>, relationships: Vec<Relationship>) -> Self {
        Self {
            entities,
            relationships,
        }
    }

    /// Look up an entity by name
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Relationships an entity participates in, via its back-references
    pub fn relationships_of(&self, name: &str) -> Vec<&Relationship> {
        let Some(entity) = self.entity(name) else {
            return Vec::new();
        };
        entity
            .relationships
            .iter()
            .filter_map(|&idx| self.relationships.get(idx))
            .collect()
    }

    /// Relationships whose foreign key points at the given entity
    pub fn referencing(&self, name: &str) -> Vec<&Relationship> {
        self.relationships
            .iter()
            .filter(|r| r.target == name && r.foreign_key.is_some())
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Topological order of entities along foreign-key references
    ///
    /// An entity holding a foreign key comes after the entity it points
    /// at; junction entities come after both sides. Downstream DDL
    /// generators can emit definitions in this order without forward
    /// references. Self-relations are resolvable within one entity and do
    /// not participate.
    pub fn dependency_order(&self) -> Result<Vec<String>, CycleError> {
        let graph = self.reference_graph();

        match toposort(&graph, None) {
            Ok(order) => Ok(order.into_iter().map(|n| graph[n].clone()).collect()),
            Err(cycle) => {
                let start = cycle.node_id();
                let path = self
                    .cycle_path(&graph, start)
                    .unwrap_or_else(|| vec![graph[start].clone()]);
                Err(CycleError { path })
            }
        }
    }

    /// Build the directed reference graph: an edge a -> b means a must be
    /// defined before b.
    fn reference_graph(&self) -> DiGraph<String, ()> {
        let mut graph = DiGraph::new();
        let mut node_map: HashMap<&str, NodeIndex> = HashMap::new();

        for entity in &self.entities {
            let idx = graph.add_node(entity.name.clone());
            node_map.insert(entity.name.as_str(), idx);
        }

        for rel in &self.relationships {
            match rel.kind {
                RelationshipKind::SelfReference => {}
                RelationshipKind::OneToOne | RelationshipKind::OneToMany => {
                    if let (Some(&target), Some(&source)) = (
                        node_map.get(rel.target.as_str()),
                        node_map.get(rel.source.as_str()),
                    ) {
                        graph.add_edge(target, source, ());
                    }
                }
                RelationshipKind::ManyToMany | RelationshipKind::ManyToManyWithAttributes => {
                    if let Some(join) = &rel.join_entity
                        && let Some(&junction) = node_map.get(join.as_str())
                    {
                        for side in [&rel.source, &rel.target] {
                            if let Some(&side_idx) = node_map.get(side.as_str()) {
                                graph.add_edge(side_idx, junction, ());
                            }
                        }
                    }
                }
            }
        }

        graph
    }

    /// Find a path from `start` back to itself, by BFS over its successors
    fn cycle_path(&self, graph: &DiGraph<String, ()>, start: NodeIndex) -> Option<Vec<String>> {
        let mut visited = HashSet::new();
        let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut queue = VecDeque::new();

        for neighbor in graph.neighbors(start) {
            if visited.insert(neighbor) {
                parent.insert(neighbor, start);
                queue.push_back(neighbor);
            }
        }

        while let Some(node) = queue.pop_front() {
            if node == start {
                break;
            }
            for neighbor in graph.neighbors(node) {
                if neighbor == start {
                    // Reconstruct start -> ... -> node -> start
                    let mut path = vec![graph[start].clone()];
                    let mut chain = Vec::new();
                    let mut current = Some(node);
                    while let Some(n) = current {
                        if n == start {
                            break;
                        }
                        chain.push(graph[n].clone());
                        current = parent.get(&n).copied();
                    }
                    chain.reverse();
                    path.extend(chain);
                    path.push(graph[start].clone());
                    return Some(path);
                }
                if visited.insert(neighbor) {
                    parent.insert(neighbor, node);
                    queue.push_back(neighbor);
                }
            }
        }

        None
    }
}
