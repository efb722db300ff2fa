//! Tests for FormSchema editing
//!
//! Tests cover:
//! - Field lifecycle (add, update, remove) and id allocation
//! - Option row editing
//! - Visibility rule targeting and cleanup
//! - Reordering, including tie-breaks and forward-rule cleanup

#[cfg(test)]
mod tests {
    use crate::models::{
        FieldDefinition, FieldId, FieldPatch, FieldType, FormSchema, SchemaError, VisibilityRule,
    };
    use crate::ordering::Direction;

    fn labelled_schema(labels: &[&str]) -> (FormSchema, Vec<FieldId>) {
        let mut schema = FormSchema::new();
        let ids = labels
            .iter()
            .map(|label| {
                let id = schema.add_field();
                schema.update_field(id, FieldPatch::new().with_label(*label));
                id
            })
            .collect();
        (schema, ids)
    }

    fn labels(schema: &FormSchema) -> Vec<&str> {
        schema.iter().map(|f| f.label.as_str()).collect()
    }

    #[test]
    fn test_add_field_defaults() {
        let mut schema = FormSchema::new();
        let first = schema.add_field();
        let second = schema.add_field();

        assert_ne!(first, second);
        let field = schema.get(second).unwrap();
        assert_eq!(field.label, "");
        assert_eq!(field.field_type, FieldType::Text);
        assert!(!field.required);
        assert!(field.options.is_empty());
        assert!(field.visibility_rule.is_none());
        assert_eq!(field.order, 1);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut schema = FormSchema::new();
        let a = schema.add_field();
        let b = schema.add_field();
        schema.remove_field(b);

        let c = schema.add_field();
        assert!(c > b);
        assert_ne!(c, a);
    }

    #[test]
    fn test_from_fields_continues_after_highest_id() {
        let schema = FormSchema::from_fields(vec![
            FieldDefinition::new(40, 0),
            FieldDefinition::new(7, 1),
        ])
        .unwrap();

        assert_eq!(schema.peek_next_id(), 41);
    }

    #[test]
    fn test_from_fields_rejects_duplicate_ids() {
        let result = FormSchema::from_fields(vec![
            FieldDefinition::new(3, 0),
            FieldDefinition::new(3, 1),
        ]);

        assert_eq!(result, Err(SchemaError::duplicate_field_id(3)));
    }

    #[test]
    fn test_from_fields_clears_forward_rules() {
        let schema = FormSchema::from_fields(vec![
            FieldDefinition::new(1, 0).with_rule(VisibilityRule::new(2, "Yes")),
            FieldDefinition::new(2, 1),
        ])
        .unwrap();

        assert!(schema.get(1).unwrap().visibility_rule.is_none());
    }

    #[test]
    fn test_update_to_select_seeds_one_empty_option() {
        let mut schema = FormSchema::new();
        let id = schema.add_field();

        assert!(schema.update_field(id, FieldPatch::new().with_type(FieldType::Select)));

        assert_eq!(schema.get(id).unwrap().options, vec![String::new()]);
    }

    #[test]
    fn test_update_unknown_field_is_noop() {
        let (mut schema, _) = labelled_schema(&["Name"]);
        let before = schema.clone();

        assert!(!schema.update_field(999, FieldPatch::new().with_label("Ghost")));
        assert_eq!(schema, before);
    }

    #[test]
    fn test_option_editing() {
        let mut schema = FormSchema::new();
        let id = schema.add_field();
        schema.update_field(id, FieldPatch::new().with_type(FieldType::Radio));

        assert!(schema.add_option(id));
        assert!(schema.update_option(id, 0, "Yes"));
        assert!(schema.update_option(id, 1, "No"));
        assert_eq!(schema.get(id).unwrap().options, vec!["Yes", "No"]);

        // Out of range: no-op
        assert!(!schema.update_option(id, 5, "Maybe"));
        assert_eq!(schema.remove_option(id, 5), None);
        assert_eq!(schema.get(id).unwrap().options.len(), 2);

        assert_eq!(schema.remove_option(id, 0), Some("Yes".to_string()));
        assert_eq!(schema.get(id).unwrap().options, vec!["No"]);

        // Unknown field
        assert!(!schema.add_option(999));
    }

    #[test]
    fn test_remove_field_clears_dependent_rules() {
        let (mut schema, ids) = labelled_schema(&["HasCar", "PlateNumber", "Colour"]);
        schema.set_visibility_rule(ids[1], ids[0], "Yes").unwrap();
        schema.set_visibility_rule(ids[2], ids[0], "Yes").unwrap();

        let removed = schema.remove_field(ids[0]).unwrap();

        assert_eq!(removed.label, "HasCar");
        assert!(schema.iter().all(|f| f.visibility_rule.is_none()));
    }

    #[test]
    fn test_remove_field_keeps_unrelated_rules() {
        let (mut schema, ids) = labelled_schema(&["A", "B", "C"]);
        schema.set_visibility_rule(ids[2], ids[0], "x").unwrap();

        schema.remove_field(ids[1]);

        assert_eq!(
            schema.get(ids[2]).unwrap().visibility_rule,
            Some(VisibilityRule::new(ids[0], "x"))
        );
        assert!(schema.remove_field(ids[1]).is_none());
    }

    #[test]
    fn test_rule_target_must_precede() {
        let (mut schema, ids) = labelled_schema(&["A", "B"]);

        assert!(matches!(
            schema.set_visibility_rule(ids[0], ids[1], "x"),
            Err(SchemaError::InvalidRuleTarget { .. })
        ));
        assert!(matches!(
            schema.set_visibility_rule(ids[0], ids[0], "x"),
            Err(SchemaError::InvalidRuleTarget { .. })
        ));
        assert!(matches!(
            schema.set_visibility_rule(ids[1], 999, "x"),
            Err(SchemaError::InvalidRuleTarget { .. })
        ));
        assert_eq!(
            schema.set_visibility_rule(999, ids[0], "x"),
            Err(SchemaError::field_not_found(999))
        );

        let preceding: Vec<FieldId> = schema.preceding_fields(ids[1]).iter().map(|f| f.id).collect();
        assert_eq!(preceding, vec![ids[0]]);
        assert!(schema.preceding_fields(ids[0]).is_empty());
    }

    #[test]
    fn test_clear_visibility_rule() {
        let (mut schema, ids) = labelled_schema(&["A", "B"]);
        schema.set_visibility_rule(ids[1], ids[0], "x").unwrap();

        assert!(schema.clear_visibility_rule(ids[1]));
        assert!(!schema.clear_visibility_rule(ids[1]));
    }

    #[test]
    fn test_move_first_up_and_last_down_are_noops() {
        let (mut schema, ids) = labelled_schema(&["A", "B", "C"]);
        let before = schema.clone();

        assert!(schema.move_field(ids[0], Direction::Up).is_none());
        assert!(schema.move_field(ids[2], Direction::Down).is_none());
        assert_eq!(schema, before);
    }

    #[test]
    fn test_move_unknown_id_is_noop() {
        let (mut schema, _) = labelled_schema(&["A", "B"]);
        let before = schema.clone();

        assert!(schema.move_field(12345, Direction::Down).is_none());
        assert_eq!(schema, before);
    }

    #[test]
    fn test_move_swaps_neighbours_only() {
        let (mut schema, ids) = labelled_schema(&["A", "B", "C", "D"]);

        let outcome = schema.move_field(ids[2], Direction::Up).unwrap();

        assert_eq!(labels(&schema), vec!["A", "C", "B", "D"]);
        assert_eq!(outcome.moved.id, ids[2]);
        assert_eq!(outcome.moved.order, 1);
        assert_eq!(outcome.displaced.id, ids[1]);
        assert_eq!(outcome.displaced.order, 2);
    }

    #[test]
    fn test_move_with_equal_orders_diverges() {
        let mut schema = FormSchema::from_fields(vec![
            FieldDefinition::new(1, 0).with_label("A"),
            FieldDefinition::new(2, 0).with_label("B"),
        ])
        .unwrap();

        schema.move_field(2, Direction::Up).unwrap();

        let orders: Vec<i64> = schema.iter().map(|f| f.order).collect();
        assert_ne!(orders[0], orders[1]);
    }

    #[test]
    fn test_move_clears_rule_that_would_point_forward() {
        let (mut schema, ids) = labelled_schema(&["HasCar", "PlateNumber"]);
        schema.set_visibility_rule(ids[1], ids[0], "Yes").unwrap();

        schema.move_field(ids[1], Direction::Up).unwrap();

        assert_eq!(labels(&schema), vec!["PlateNumber", "HasCar"]);
        assert!(schema.get(ids[1]).unwrap().visibility_rule.is_none());
    }

    #[test]
    fn test_move_keeps_rule_that_still_points_back() {
        let (mut schema, ids) = labelled_schema(&["HasCar", "Other", "PlateNumber"]);
        schema.set_visibility_rule(ids[2], ids[0], "Yes").unwrap();

        schema.move_field(ids[2], Direction::Up).unwrap();

        assert_eq!(labels(&schema), vec!["HasCar", "PlateNumber", "Other"]);
        assert!(schema.get(ids[2]).unwrap().visibility_rule.is_some());
    }

    #[test]
    fn test_find_by_label_returns_first_match() {
        let (schema, ids) = labelled_schema(&["Name", "Name"]);
        assert_eq!(schema.find_by_label("Name").map(|f| f.id), Some(ids[0]));
        assert!(schema.find_by_label("Missing").is_none());
    }

    #[test]
    fn test_field_added_after_removal_moves_once_normalized() {
        let mut schema = FormSchema::new();
        let first = schema.add_field();
        let removed = schema.add_field();
        let third = schema.add_field();
        schema.remove_field(removed);
        let added = schema.add_field();

        // Tied with the field before it until normalized
        let orders: Vec<i64> = schema.iter().map(|f| f.order).collect();
        assert_eq!(orders, vec![0, 2, 2]);

        let changed = schema.normalize_orders();
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].id, third);
        let orders: Vec<i64> = schema.iter().map(|f| f.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);

        schema.move_field(added, Direction::Up).unwrap();
        let ids: Vec<FieldId> = schema.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![first, added, third]);
    }
}
