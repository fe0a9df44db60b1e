//! Aggregate validation report
//!
//! One validation pass surfaces every problem in a schema document rather
//! than only the first; the report is the collected result.

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};

/// Collected validation errors for one schema document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ValidationReport {
    errors: Vec<SchemaError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: SchemaError) {
        self.errors.push(error);
    }

    /// No rule was violated
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[SchemaError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<SchemaError> {
        self.errors
    }
}
