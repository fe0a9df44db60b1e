//! Validation functionality
//!
//! Provides validation logic for:
//! - Entity and field names
//! - Relationship classification
//! - Index declarations
//!
//! plus the batch pipeline that runs registration, sealing, relationship
//! resolution and index validation in strict order over one document.

pub mod indexes;
pub mod input;
pub mod relationships;
pub mod report;

pub use indexes::IndexValidator;
pub use input::{NameError, NameResult};
pub use relationships::RelationshipResolver;
pub use report::ValidationReport;

use crate::error::{SchemaError, SchemaResult};
use crate::graph::SchemaGraph;
use crate::models::SchemaDocument;
use crate::registry::EntityRegistry;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Error propagation policy for a validation pass
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ValidationMode {
    /// Collect every violation and return them together (default)
    #[default]
    Collect,
    /// Abort the pass on the first violation
    FailFast,
}

/// Result of validating one schema document
///
/// The graph always holds whatever normalized successfully; with a clean
/// error list it is the full contract handed to downstream generators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationOutcome {
    pub graph: SchemaGraph,
    pub errors: Vec<SchemaError>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Batch validator for schema documents
///
/// Runs the strict pipeline order: registration, sealing, relationship
/// resolution, index validation. Single-threaded by design; validate
/// independent documents with independent validators.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator {
    mode: ValidationMode,
}

impl SchemaValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: ValidationMode) -> Self {
        Self { mode }
    }

    /// Validate a document, collecting errors according to the mode
    ///
    /// In `Collect` mode this never returns `Err`; every violation lands in
    /// the outcome's error list. In `FailFast` mode the first violation is
    /// returned as `Err`.
    pub fn validate(&self, doc: &SchemaDocument) -> SchemaResult<ValidationOutcome> {
        let mut report = ValidationReport::new();
        let mut registry = EntityRegistry::new();

        for decl in &doc.entities {
            if let Err(err) = registry.register(decl.name.clone(), decl.fields.clone()) {
                self.record(&mut report, err)?;
            }
        }
        registry.seal_all();

        let mut resolver = RelationshipResolver::new();
        for decl in &doc.relationships {
            if let Err(err) = resolver.declare(&mut registry, decl) {
                self.record(&mut report, err)?;
            }
        }

        let index_validator = IndexValidator::new();
        for decl in &doc.indexes {
            if let Err(err) =
                index_validator.declare(&mut registry, &decl.entity, decl.fields.clone(), decl.kind)
            {
                self.record(&mut report, err)?;
            }
        }

        let graph = SchemaGraph::from_parts(registry.into_entities(), resolver.into_relationships());
        info!(
            "validated schema document: {} entities, {} relationships, {} errors",
            graph.entities.len(),
            graph.relationships.len(),
            report.len()
        );

        Ok(ValidationOutcome {
            graph,
            errors: report.into_errors(),
        })
    }

    /// Validate a document in fail-fast fashion regardless of mode,
    /// returning the normalized graph only when the document is clean
    pub fn validate_strict(&self, doc: &SchemaDocument) -> SchemaResult<SchemaGraph> {
        let strict = Self::with_mode(ValidationMode::FailFast);
        strict.validate(doc).map(|outcome| outcome.graph)
    }

    fn record(&self, report: &mut ValidationReport, err: SchemaError) -> SchemaResult<()> {
        match self.mode {
            ValidationMode::FailFast => Err(err),
            ValidationMode::Collect => {
                warn!("validation error: {}", err);
                report.push(err);
                Ok(())
            }
        }
    }
}
