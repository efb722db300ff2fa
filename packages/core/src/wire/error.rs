//! Wire codec errors

use crate::models::{FieldId, SchemaError};
use thiserror::Error;

/// Errors decoding or encoding the persisted form schema format
#[derive(Error, Debug)]
pub enum WireError {
    /// Payload is not valid JSON for the expected shape
    #[error("Invalid schema JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A field's `type` is outside the supported set
    #[error("Field #{index} has unknown type '{value}'")]
    UnknownFieldType { index: usize, value: String },

    /// Two fields share an `id`
    #[error("Duplicate field id {field_id} in schema")]
    DuplicateFieldId { field_id: FieldId },

    /// The schema could not be assembled from decoded fields
    #[error("Invalid schema: {0}")]
    InvalidShape(#[from] SchemaError),
}

impl WireError {
    /// Create an UnknownFieldType error
    pub fn unknown_field_type(index: usize, value: impl Into<String>) -> Self {
        Self::UnknownFieldType {
            index,
            value: value.into(),
        }
    }

    /// Create a DuplicateFieldId error
    pub fn duplicate_field_id(field_id: FieldId) -> Self {
        Self::DuplicateFieldId { field_id }
    }
}
