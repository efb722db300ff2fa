//! Form Field Definitions
//!
//! A field is one admin-configurable input on a dynamic form: event
//! registration, admission requirements, or a form column in the page builder.
//!
//! Visibility rules are held by target **id** here. The persisted format joins
//! them by label instead; see [`crate::wire`].

use super::error::SchemaError;
use crate::ordering::OrderedEntity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Field identifier, unique within one schema and never reused
pub type FieldId = u64;

/// Input type of a field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Email,
    Number,
    Textarea,
    Select,
    Radio,
    Checkbox,
    File,
}

impl FieldType {
    pub const ALL: [FieldType; 8] = [
        FieldType::Text,
        FieldType::Email,
        FieldType::Number,
        FieldType::Textarea,
        FieldType::Select,
        FieldType::Radio,
        FieldType::Checkbox,
        FieldType::File,
    ];

    /// Whether the field offers a list of choices
    pub fn has_options(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::Radio | FieldType::Checkbox)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Number => "number",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::File => "file",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|field_type| field_type.as_str() == s)
            .ok_or_else(|| SchemaError::unknown_field_type(s))
    }
}

/// Show a field only when an earlier field holds a given value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityRule {
    /// Field whose value is inspected; must precede the ruled field
    pub target: FieldId,

    /// Value the target must hold, compared as an exact string
    pub expected_value: String,
}

impl VisibilityRule {
    pub fn new(target: FieldId, expected_value: impl Into<String>) -> Self {
        Self {
            target,
            expected_value: expected_value.into(),
        }
    }
}

/// One configurable form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub id: FieldId,

    /// Question prompt; may be empty while the admin is still editing
    pub label: String,

    pub field_type: FieldType,

    pub required: bool,

    /// Choices for select/radio/checkbox. Kept when the type moves away from
    /// those, so switching back restores them.
    pub options: Vec<String>,

    pub visibility_rule: Option<VisibilityRule>,

    /// Position among the schema's fields
    pub order: i64,
}

impl FieldDefinition {
    /// A blank text field
    pub fn new(id: FieldId, order: i64) -> Self {
        Self {
            id,
            label: String::new(),
            field_type: FieldType::Text,
            required: false,
            options: Vec::new(),
            visibility_rule: None,
            order,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the type, seeding options the same way [`FieldPatch`] does
    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.set_type(field_type);
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rule(mut self, rule: VisibilityRule) -> Self {
        self.visibility_rule = Some(rule);
        self
    }

    /// Change the type; entering a choice type with no options adds one empty row
    pub fn set_type(&mut self, field_type: FieldType) {
        self.field_type = field_type;
        if field_type.has_options() && self.options.is_empty() {
            self.options.push(String::new());
        }
    }

    /// Apply a partial update
    pub fn apply(&mut self, patch: FieldPatch) {
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(required) = patch.required {
            self.required = required;
        }
        if let Some(options) = patch.options {
            self.options = options;
        }
        if let Some(field_type) = patch.field_type {
            self.set_type(field_type);
        }
    }
}

impl OrderedEntity for FieldDefinition {
    type Id = FieldId;

    fn entity_id(&self) -> &FieldId {
        &self.id
    }

    fn order(&self) -> i64 {
        self.order
    }

    fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}

/// Partial field update
///
/// Only provided attributes change. Visibility rules are not patchable here;
/// use [`crate::models::FormSchema::set_visibility_rule`] which checks the target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl FieldPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = Some(options);
        self
    }

    /// Check if the patch contains any changes
    pub fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.field_type.is_none()
            && self.required.is_none()
            && self.options.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_parse_and_display() {
        for field_type in FieldType::ALL {
            let parsed: FieldType = field_type.as_str().parse().unwrap();
            assert_eq!(parsed, field_type);
        }
        assert_eq!(FieldType::Textarea.to_string(), "textarea");
        assert_eq!(
            "date".parse::<FieldType>(),
            Err(SchemaError::unknown_field_type("date"))
        );
    }

    #[test]
    fn test_choice_types() {
        let choice: Vec<FieldType> = FieldType::ALL
            .into_iter()
            .filter(FieldType::has_options)
            .collect();
        assert_eq!(
            choice,
            vec![FieldType::Select, FieldType::Radio, FieldType::Checkbox]
        );
    }

    #[test]
    fn test_entering_choice_type_seeds_one_empty_option() {
        let mut field = FieldDefinition::new(1, 0);
        field.apply(FieldPatch::new().with_type(FieldType::Select));
        assert_eq!(field.options, vec![String::new()]);
    }

    #[test]
    fn test_existing_options_are_kept() {
        let mut field = FieldDefinition::new(1, 0).with_options(["Yes", "No"]);
        field.apply(FieldPatch::new().with_type(FieldType::Radio));
        assert_eq!(field.options, vec!["Yes", "No"]);

        field.apply(FieldPatch::new().with_type(FieldType::Text));
        assert_eq!(field.field_type, FieldType::Text);
        assert_eq!(field.options, vec!["Yes", "No"]);
    }

    #[test]
    fn test_patch_with_empty_options_and_choice_type() {
        let mut field = FieldDefinition::new(1, 0).with_options(["A"]);
        field.apply(
            FieldPatch::new()
                .with_options(Vec::new())
                .with_type(FieldType::Checkbox),
        );
        assert_eq!(field.options, vec![String::new()]);
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(FieldPatch::new().is_empty());
        assert!(!FieldPatch::new().with_required(true).is_empty());
    }

    #[test]
    fn test_patch_deserialization() {
        let patch: FieldPatch =
            serde_json::from_value(serde_json::json!({ "type": "select", "label": "Faculty" }))
                .unwrap();
        assert_eq!(patch.field_type, Some(FieldType::Select));
        assert_eq!(patch.label.as_deref(), Some("Faculty"));
        assert!(patch.options.is_none());
    }
}
