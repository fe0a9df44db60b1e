//! Name validation utilities
//!
//! Validates entity and field names before registration. Keeping the rules
//! here means every downstream consumer (DDL generators in particular) can
//! rely on identifiers being safe to emit.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum length for entity names
pub const MAX_ENTITY_NAME_LENGTH: usize = 255;

/// Maximum length for field names
pub const MAX_FIELD_NAME_LENGTH: usize = 255;

/// Errors that can occur during name validation.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq)]
pub enum NameError {
    /// Input is empty when a value is required
    #[error("{0} cannot be empty")]
    Empty(String),

    /// Input exceeds maximum allowed length
    #[error("{field} exceeds maximum length (max: {max}, got: {actual})")]
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },

    /// Input contains invalid characters
    #[error("{field} contains invalid character '{ch}'")]
    InvalidCharacters { field: String, ch: char },

    /// Input has invalid format
    #[error("{0}: {1}")]
    InvalidFormat(String, String),

    /// Two fields on one entity share a name
    #[error("duplicate field '{field}' on entity '{entity}'")]
    DuplicateField { entity: String, field: String },
}

/// Result type for name validation operations.
pub type NameResult<T> = Result<T, NameError>;

/// Validate an entity name.
///
/// # Rules
///
/// - Must not be empty
/// - Must not exceed 255 characters
/// - Must start with a letter or underscore
/// - May contain letters, digits, underscores, and hyphens
///
/// # Examples
///
/// ```
/// use schema_modelling_core::validation::input::validate_entity_name;
///
/// assert!(validate_entity_name("User").is_ok());
/// assert!(validate_entity_name("user_orders").is_ok());
/// assert!(validate_entity_name("").is_err());
/// assert!(validate_entity_name("123_invalid").is_err());
/// ```
pub fn validate_entity_name(name: &str) -> NameResult<()> {
    validate_identifier(name, "entity name", MAX_ENTITY_NAME_LENGTH)
}

/// Validate a field name. Same rules as entity names.
pub fn validate_field_name(name: &str) -> NameResult<()> {
    validate_identifier(name, "field name", MAX_FIELD_NAME_LENGTH)
}

fn validate_identifier(name: &str, what: &str, max: usize) -> NameResult<()> {
    if name.is_empty() {
        return Err(NameError::Empty(what.to_string()));
    }

    if name.len() > max {
        return Err(NameError::TooLong {
            field: what.to_string(),
            max,
            actual: name.len(),
        });
    }

    // Must start with a letter or underscore
    let first_char = match name.chars().next() {
        Some(c) => c,
        None => return Err(NameError::Empty(what.to_string())),
    };
    if !first_char.is_alphabetic() && first_char != '_' {
        return Err(NameError::InvalidFormat(
            what.to_string(),
            "must start with a letter or underscore".to_string(),
        ));
    }

    // May contain letters, digits, underscores, and hyphens
    for c in name.chars() {
        if !c.is_alphanumeric() && c != '_' && c != '-' {
            return Err(NameError::InvalidCharacters {
                field: what.to_string(),
                ch: c,
            });
        }
    }

    Ok(())
}
