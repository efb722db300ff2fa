//! Error types for form schema editing
//!
//! Schema mutations are total: unknown ids and out-of-range indices are
//! no-ops. The errors here cover the few requests a caller must be told about.

use super::field::FieldId;
use thiserror::Error;

/// Errors raised by schema editing operations
///
/// # Examples
///
/// ```rust
/// use campusforms_core::models::SchemaError;
///
/// let err = SchemaError::invalid_rule_target(7, 9, "target does not precede the field");
/// assert!(err.to_string().contains("field 7"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Referenced field does not exist in the schema
    #[error("Field {field_id} does not exist")]
    FieldNotFound { field_id: FieldId },

    /// A visibility rule may only target a field placed before it
    #[error("Invalid visibility rule on field {field_id}: target {target_id} rejected ({reason})")]
    InvalidRuleTarget {
        field_id: FieldId,
        target_id: FieldId,
        reason: String,
    },

    /// Two fields in one schema share an id
    #[error("Duplicate field id {field_id}")]
    DuplicateFieldId { field_id: FieldId },

    /// Field type outside the supported set
    #[error("Unknown field type '{value}'")]
    UnknownFieldType { value: String },
}

impl SchemaError {
    /// Create a FieldNotFound error
    pub fn field_not_found(field_id: FieldId) -> Self {
        Self::FieldNotFound { field_id }
    }

    /// Create an InvalidRuleTarget error
    pub fn invalid_rule_target(
        field_id: FieldId,
        target_id: FieldId,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidRuleTarget {
            field_id,
            target_id,
            reason: reason.into(),
        }
    }

    /// Create a DuplicateFieldId error
    pub fn duplicate_field_id(field_id: FieldId) -> Self {
        Self::DuplicateFieldId { field_id }
    }

    /// Create an UnknownFieldType error
    pub fn unknown_field_type(value: impl Into<String>) -> Self {
        Self::UnknownFieldType {
            value: value.into(),
        }
    }
}
