//! Form Schema Editing
//!
//! A [`FormSchema`] is the ordered field list behind every dynamic form in
//! the admin panel. Insertion order is render order, and every operation here
//! keeps two invariants:
//!
//! - field ids are unique and never reused after removal
//! - a visibility rule only ever targets a field placed **before** its owner
//!
//! Removing a field clears the rules that targeted it, and a reorder that
//! leaves a rule pointing forward clears that rule. Unknown ids and
//! out-of-range option indices are silent no-ops.
//!
//! ## Example
//!
//! ```rust
//! use campusforms_core::models::{FieldPatch, FieldType, FormSchema};
//!
//! let mut schema = FormSchema::new();
//! let has_car = schema.add_field();
//! let plate = schema.add_field();
//!
//! schema.update_field(has_car, FieldPatch::new().with_label("HasCar").with_type(FieldType::Radio));
//! schema.update_field(plate, FieldPatch::new().with_label("PlateNumber"));
//! schema.set_visibility_rule(plate, has_car, "Yes").unwrap();
//!
//! schema.remove_field(has_car);
//! assert!(schema.get(plate).unwrap().visibility_rule.is_none());
//! ```

use super::error::SchemaError;
use super::field::{FieldDefinition, FieldId, FieldPatch, VisibilityRule};
use crate::ordering::{self, Direction, OrderAssignment, ReorderOutcome};
use crate::wire::WireField;
use serde::{Deserialize, Serialize};

/// Ordered list of form fields
///
/// Serializes as the persisted wire array (see [`crate::wire`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<WireField>", into = "Vec<WireField>")]
pub struct FormSchema {
    fields: Vec<FieldDefinition>,
    next_id: FieldId,
}

impl Default for FormSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSchema {
    /// An empty schema
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            next_id: 1,
        }
    }

    /// Build a schema from loaded fields
    ///
    /// Fields are sorted by order (stable) and rules that do not target an
    /// earlier field are cleared.
    ///
    /// # Errors
    ///
    /// `DuplicateFieldId` if two fields share an id.
    pub fn from_fields(mut fields: Vec<FieldDefinition>) -> Result<Self, SchemaError> {
        for (index, field) in fields.iter().enumerate() {
            if fields[..index].iter().any(|earlier| earlier.id == field.id) {
                return Err(SchemaError::duplicate_field_id(field.id));
            }
        }

        ordering::sort_by_order(&mut fields);
        let next_id = fields.iter().map(|f| f.id).max().map_or(1, |max| max + 1);

        let mut schema = Self { fields, next_id };
        schema.reconcile_rules();
        Ok(schema)
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDefinition> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, id: FieldId) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Position of a field in render order
    pub fn position(&self, id: FieldId) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }

    /// First field carrying `label`, in render order
    pub fn find_by_label(&self, label: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.label == label)
    }

    /// Fields a rule on `id` may target: everything placed before it
    ///
    /// Empty for an unknown id.
    pub fn preceding_fields(&self, id: FieldId) -> &[FieldDefinition] {
        match self.position(id) {
            Some(position) => &self.fields[..position],
            None => &[],
        }
    }

    /// Id the next added field will receive
    pub fn peek_next_id(&self) -> FieldId {
        self.next_id
    }

    /// Append a blank text field and return its id
    pub fn add_field(&mut self) -> FieldId {
        let id = self.next_id;
        self.next_id += 1;

        let order = self.fields.len() as i64;
        self.fields.push(FieldDefinition::new(id, order));
        id
    }

    /// Apply a partial update to one field
    ///
    /// Returns `false` (and changes nothing) for an unknown id.
    pub fn update_field(&mut self, id: FieldId, patch: FieldPatch) -> bool {
        match self.field_mut(id) {
            Some(field) => {
                field.apply(patch);
                true
            }
            None => false,
        }
    }

    /// Remove a field, clearing every rule that targeted it
    pub fn remove_field(&mut self, id: FieldId) -> Option<FieldDefinition> {
        let position = self.position(id)?;
        let removed = self.fields.remove(position);

        for field in &mut self.fields {
            if field
                .visibility_rule
                .as_ref()
                .is_some_and(|rule| rule.target == id)
            {
                tracing::debug!(
                    "Clearing visibility rule on field {} (target {} removed)",
                    field.id,
                    id
                );
                field.visibility_rule = None;
            }
        }

        Some(removed)
    }

    /// Append an empty option row
    pub fn add_option(&mut self, field_id: FieldId) -> bool {
        match self.field_mut(field_id) {
            Some(field) => {
                field.options.push(String::new());
                true
            }
            None => false,
        }
    }

    /// Overwrite one option; out-of-range index is a no-op
    pub fn update_option(&mut self, field_id: FieldId, index: usize, value: impl Into<String>) -> bool {
        match self
            .field_mut(field_id)
            .and_then(|field| field.options.get_mut(index))
        {
            Some(option) => {
                *option = value.into();
                true
            }
            None => false,
        }
    }

    /// Remove one option; out-of-range index is a no-op
    pub fn remove_option(&mut self, field_id: FieldId, index: usize) -> Option<String> {
        let field = self.field_mut(field_id)?;
        if index < field.options.len() {
            Some(field.options.remove(index))
        } else {
            None
        }
    }

    /// Make a field conditional on an earlier field's value
    ///
    /// # Errors
    ///
    /// - `FieldNotFound` if `field_id` is unknown
    /// - `InvalidRuleTarget` if `target` is unknown, is the field itself, or
    ///   is placed after it
    pub fn set_visibility_rule(
        &mut self,
        field_id: FieldId,
        target: FieldId,
        expected_value: impl Into<String>,
    ) -> Result<(), SchemaError> {
        let position = self
            .position(field_id)
            .ok_or_else(|| SchemaError::field_not_found(field_id))?;

        if target == field_id {
            return Err(SchemaError::invalid_rule_target(
                field_id,
                target,
                "a field cannot depend on itself",
            ));
        }

        match self.position(target) {
            None => Err(SchemaError::invalid_rule_target(
                field_id,
                target,
                "target does not exist",
            )),
            Some(target_position) if target_position > position => {
                Err(SchemaError::invalid_rule_target(
                    field_id,
                    target,
                    "target does not precede the field",
                ))
            }
            Some(_) => {
                self.fields[position].visibility_rule =
                    Some(VisibilityRule::new(target, expected_value));
                Ok(())
            }
        }
    }

    /// Make a field always visible; returns whether a rule was removed
    pub fn clear_visibility_rule(&mut self, field_id: FieldId) -> bool {
        self.field_mut(field_id)
            .and_then(|field| field.visibility_rule.take())
            .is_some()
    }

    /// Move a field one step up or down
    ///
    /// Returns `None` without touching the schema when the id is unknown or
    /// the field is already at that end. Rules left pointing at a field that
    /// now comes later are cleared.
    pub fn move_field(&mut self, id: FieldId, direction: Direction) -> Option<ReorderOutcome<FieldId>> {
        let outcome = ordering::move_entity(&mut self.fields, &id, direction)?;
        self.reconcile_rules();
        Some(outcome)
    }

    /// Rewrite field orders to `0..len` in render order
    ///
    /// `add_field` gives a new field `order = len`, which ties with the last
    /// field once anything has been removed. Returns the changed assignments
    /// for the caller to persist.
    pub fn normalize_orders(&mut self) -> Vec<OrderAssignment<FieldId>> {
        ordering::normalize_orders(&mut self.fields, None)
    }

    /// Clear every rule whose target is missing or not placed earlier
    ///
    /// Returns the number of rules cleared.
    pub fn reconcile_rules(&mut self) -> usize {
        let mut cleared = 0;

        for position in 0..self.fields.len() {
            let Some(target) = self.fields[position]
                .visibility_rule
                .as_ref()
                .map(|rule| rule.target)
            else {
                continue;
            };

            let precedes = self.fields[..position].iter().any(|f| f.id == target);
            if !precedes {
                tracing::debug!(
                    "Clearing visibility rule on field {}: target {} no longer precedes it",
                    self.fields[position].id,
                    target
                );
                self.fields[position].visibility_rule = None;
                cleared += 1;
            }
        }

        cleared
    }

    fn field_mut(&mut self, id: FieldId) -> Option<&mut FieldDefinition> {
        self.fields.iter_mut().find(|f| f.id == id)
    }
}

impl<'a> IntoIterator for &'a FormSchema {
    type Item = &'a FieldDefinition;
    type IntoIter = std::slice::Iter<'a, FieldDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod schema_test;
