//! Conditional Field Visibility
//!
//! A field with a visibility rule is shown only while its target field holds
//! exactly the expected string. Values are compared raw: no trimming, no case
//! folding, no numeric coercion, since submitted form data is always text.
//!
//! Hidden fields do not cascade. A dependent of a hidden field is still judged
//! on the raw value map; it only disappears too when the target's value is
//! absent.
//!
//! Visibility is recomputed from scratch on every call. Any value change can
//! flip later fields, so nothing is cached between calls.

use crate::models::{FieldDefinition, FieldId, FormSchema};
use std::collections::HashMap;

/// Current form values keyed by field id
pub type FieldValues = HashMap<FieldId, String>;

/// Whether a single field is currently shown
pub fn is_field_visible(field: &FieldDefinition, values: &FieldValues) -> bool {
    match &field.visibility_rule {
        None => true,
        Some(rule) => values
            .get(&rule.target)
            .is_some_and(|value| *value == rule.expected_value),
    }
}

/// Visible fields in schema order
pub fn filter_visible_fields<'a>(schema: &'a FormSchema, values: &FieldValues) -> Vec<&'a FieldDefinition> {
    schema
        .iter()
        .filter(|field| is_field_visible(field, values))
        .collect()
}

/// Visible required fields with no answer
///
/// An answer that is absent or only whitespace counts as missing. Hidden
/// required fields are never reported.
pub fn missing_required_fields<'a>(schema: &'a FormSchema, values: &FieldValues) -> Vec<&'a FieldDefinition> {
    filter_visible_fields(schema, values)
        .into_iter()
        .filter(|field| field.required)
        .filter(|field| {
            values
                .get(&field.id)
                .map_or(true, |value| value.trim().is_empty())
        })
        .collect()
}

impl FormSchema {
    /// See [`filter_visible_fields`]
    pub fn visible_fields(&self, values: &FieldValues) -> Vec<&FieldDefinition> {
        filter_visible_fields(self, values)
    }
}
