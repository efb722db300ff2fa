//! Performance benchmarks for CampusForms core operations
//!
//! Run with: `cargo bench -p campusforms-core`
//!
//! These benchmarks measure the paths hit on every keystroke in the builders:
//! - Visibility filtering over a long form
//! - Field reorder with rule reconciliation
//! - Wire decode of a stored schema
//! - Menu tree assembly

use campusforms_core::models::{FieldDefinition, FieldType, FormSchema, Menu, MenuItem, VisibilityRule};
use campusforms_core::ordering::{build_tree, Direction};
use campusforms_core::visibility::{filter_visible_fields, FieldValues};
use campusforms_core::wire::{parse_schema, schema_to_json};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Schema of N fields where every odd field depends on the field before it
fn generate_chained_schema(field_count: usize) -> FormSchema {
    let fields = (0..field_count)
        .map(|i| {
            let id = i as u64 + 1;
            let field = FieldDefinition::new(id, i as i64)
                .with_label(format!("Question {}", id))
                .with_type(if i % 2 == 0 { FieldType::Radio } else { FieldType::Text })
                .with_options(if i % 2 == 0 { vec!["Yes", "No"] } else { vec![] });
            if i % 2 == 1 {
                field.with_rule(VisibilityRule::new(id - 1, "Yes"))
            } else {
                field
            }
        })
        .collect();

    FormSchema::from_fields(fields).unwrap()
}

fn generate_values(schema: &FormSchema) -> FieldValues {
    schema
        .iter()
        .filter(|field| field.field_type == FieldType::Radio)
        .map(|field| {
            let answer = if field.id % 4 == 1 { "Yes" } else { "No" };
            (field.id, answer.to_string())
        })
        .collect()
}

fn bench_visibility(c: &mut Criterion) {
    let schema = generate_chained_schema(500);
    let values = generate_values(&schema);

    c.bench_function("filter_visible_fields_500", |b| {
        b.iter(|| black_box(filter_visible_fields(black_box(&schema), black_box(&values)).len()))
    });
}

fn bench_reorder(c: &mut Criterion) {
    let mut group = c.benchmark_group("reorder");

    group.bench_function("move_field_down_up_500", |b| {
        let mut schema = generate_chained_schema(500);
        b.iter(|| {
            schema.move_field(250, Direction::Down);
            schema.move_field(250, Direction::Up);
        })
    });

    group.bench_function("menu_tree_200_items", |b| {
        let mut menu = Menu::new(1, "Main");
        menu.items = (0..200)
            .map(|i| {
                let item = MenuItem::new(i + 1, 1, format!("Item {}", i + 1)).with_order(i % 10);
                if i >= 20 {
                    item.with_parent(i % 20 + 1)
                } else {
                    item
                }
            })
            .collect();

        b.iter(|| black_box(build_tree(black_box(&menu.items)).len()))
    });

    group.finish();
}

fn bench_wire(c: &mut Criterion) {
    let json = schema_to_json(&generate_chained_schema(500)).unwrap();

    let mut group = c.benchmark_group("wire");
    group.sample_size(20);
    group.bench_function("parse_schema_500", |b| {
        b.iter(|| black_box(parse_schema(black_box(&json)).unwrap().len()))
    });
    group.finish();
}

criterion_group!(benches, bench_visibility, bench_reorder, bench_wire);
criterion_main!(benches);
