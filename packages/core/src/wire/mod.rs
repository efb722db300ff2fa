//! Persisted Form Schema Format
//!
//! The backend stores a form schema as a JSON array of fields. Visibility
//! rules are keyed by the **label** of the target field, not its id:
//!
//! ```json
//! [
//!   { "id": 1, "label": "HasCar", "type": "radio", "required": true,
//!     "options": ["Yes", "No"], "logic_target": "", "logic_value": "" },
//!   { "id": 2, "label": "PlateNumber", "type": "text", "required": false,
//!     "options": [], "logic_target": "HasCar", "logic_value": "Yes" }
//! ]
//! ```
//!
//! Internally rules hold target ids; the id<->label join happens only here.
//! A label is resolved to the **first preceding** field carrying it, so two
//! earlier fields sharing a label make the rule ambiguous. That is a known
//! limitation of the stored format; [`ambiguous_rule_targets`] reports it.
//!
//! The stored array carries neither `order` nor the id counter. Decoding
//! sets `order` to the array position and the next id to `max(id) + 1`, so a
//! schema that had fields removed comes back with compacted orders, and an id
//! removed from the end may be handed out again after a reload. Field
//! sequence, ids, attributes and rules survive unchanged.
//!
//! Older records are accepted as well:
//!
//! - fields without `id` (event registration forms) get fresh ids
//! - `options` as a comma-separated string (admission forms) is split
//! - missing or `null` `label`, `options`, `logic_*` and `required` default

mod error;

pub use error::WireError;

use crate::models::{FieldDefinition, FieldId, FieldType, FormSchema, VisibilityRule};
use crate::visibility::FieldValues;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{HashMap, HashSet};

/// One field as stored by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FieldId>,

    #[serde(default, deserialize_with = "nullable_string")]
    pub label: String,

    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default, deserialize_with = "deserialize_options")]
    pub options: Vec<String>,

    /// Label of the target field, `""` for none
    #[serde(default, deserialize_with = "nullable_string")]
    pub logic_target: String,

    /// Expected value, `""` for none
    #[serde(default, deserialize_with = "nullable_string")]
    pub logic_value: String,
}

fn default_field_type() -> String {
    FieldType::Text.as_str().to_string()
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OptionsRepr {
    List(Vec<String>),
    Csv(String),
}

fn deserialize_options<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OptionsRepr>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OptionsRepr::List(options)) => options,
        Some(OptionsRepr::Csv(text)) => split_csv_options(&text),
    })
}

/// Split a legacy `"Option A, Option B"` string into trimmed, non-empty options
pub fn split_csv_options(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .map(String::from)
        .collect()
}

/// Build a schema from stored fields
///
/// Field order is array order. A non-empty `logic_target` that matches no
/// preceding label is dropped (the field becomes always visible).
///
/// # Errors
///
/// - `UnknownFieldType` for a `type` outside the supported set
/// - `DuplicateFieldId` when two fields carry the same explicit id
pub fn decode_fields(wire: Vec<WireField>) -> Result<FormSchema, WireError> {
    let mut next_id = wire
        .iter()
        .filter_map(|field| field.id)
        .max()
        .map_or(1, |max| max + 1);
    let mut seen = HashSet::new();
    let mut fields: Vec<FieldDefinition> = Vec::with_capacity(wire.len());

    for (index, field) in wire.into_iter().enumerate() {
        let id = match field.id {
            Some(id) => id,
            None => {
                let id = next_id;
                next_id += 1;
                id
            }
        };
        if !seen.insert(id) {
            return Err(WireError::duplicate_field_id(id));
        }

        let field_type: FieldType = field
            .field_type
            .parse()
            .map_err(|_| WireError::unknown_field_type(index, &field.field_type))?;

        let visibility_rule = if field.logic_target.is_empty() {
            None
        } else {
            match fields.iter().find(|earlier| earlier.label == field.logic_target) {
                Some(target) => Some(VisibilityRule::new(target.id, field.logic_value)),
                None => {
                    tracing::debug!(
                        "Dropping visibility rule on field {}: no preceding field labelled '{}'",
                        id,
                        field.logic_target
                    );
                    None
                }
            }
        };

        fields.push(FieldDefinition {
            id,
            label: field.label,
            field_type,
            required: field.required,
            options: field.options,
            visibility_rule,
            order: index as i64,
        });
    }

    Ok(FormSchema::from_fields(fields)?)
}

/// Stored form of a schema, rules joined by target label
pub fn encode_fields(schema: &FormSchema) -> Vec<WireField> {
    schema
        .iter()
        .map(|field| {
            let (logic_target, logic_value) = match &field.visibility_rule {
                Some(rule) => match schema.get(rule.target) {
                    Some(target) => (target.label.clone(), rule.expected_value.clone()),
                    None => (String::new(), String::new()),
                },
                None => (String::new(), String::new()),
            };

            WireField {
                id: Some(field.id),
                label: field.label.clone(),
                field_type: field.field_type.as_str().to_string(),
                required: field.required,
                options: field.options.clone(),
                logic_target,
                logic_value,
            }
        })
        .collect()
}

/// Fields whose rule would resolve to a different target after a save/load
///
/// This happens when the target's label is empty or when an earlier field
/// carries the same label.
pub fn ambiguous_rule_targets(schema: &FormSchema) -> Vec<FieldId> {
    schema
        .iter()
        .filter(|field| {
            let Some(rule) = &field.visibility_rule else {
                return false;
            };
            let Some(target) = schema.get(rule.target) else {
                return false;
            };
            let resolved = schema
                .preceding_fields(field.id)
                .iter()
                .find(|earlier| earlier.label == target.label)
                .map(|earlier| earlier.id);

            target.label.is_empty() || resolved != Some(target.id)
        })
        .map(|field| field.id)
        .collect()
}

/// Parse a stored schema from JSON text
pub fn parse_schema(json: &str) -> Result<FormSchema, WireError> {
    let wire: Vec<WireField> = serde_json::from_str(json)?;
    decode_fields(wire)
}

/// Parse a stored schema from an already-decoded JSON value
pub fn parse_schema_value(value: serde_json::Value) -> Result<FormSchema, WireError> {
    let wire: Vec<WireField> = serde_json::from_value(value)?;
    decode_fields(wire)
}

/// Serialize a schema to stored JSON text
pub fn schema_to_json(schema: &FormSchema) -> Result<String, WireError> {
    Ok(serde_json::to_string(&encode_fields(schema))?)
}

/// Convert label-keyed answers to id-keyed values
///
/// Each label maps to the first field carrying it; unknown labels are ignored.
pub fn values_by_label(schema: &FormSchema, answers: &HashMap<String, String>) -> FieldValues {
    answers
        .iter()
        .filter_map(|(label, value)| {
            schema
                .find_by_label(label)
                .map(|field| (field.id, value.clone()))
        })
        .collect()
}

impl TryFrom<Vec<WireField>> for FormSchema {
    type Error = WireError;

    fn try_from(wire: Vec<WireField>) -> Result<Self, Self::Error> {
        decode_fields(wire)
    }
}

impl From<FormSchema> for Vec<WireField> {
    fn from(schema: FormSchema) -> Self {
        encode_fields(&schema)
    }
}
