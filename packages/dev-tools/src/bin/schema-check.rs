//! Schema checker for stored form schemas
//!
//! Loads a persisted form schema, applies a set of answers and prints which
//! fields a respondent would see, which required answers are missing and
//! which visibility rules would not survive a save/load round-trip.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin schema-check -- event.json HasCar=Yes "Full Name=Ada Lovelace"
//! ```
//!
//! The file may hold the bare field array or a record with a `form_schema`
//! key (as events and pages are exported). Answers are `Label=Value` pairs;
//! a label maps to the first field carrying it.
//!
//! Set `RUST_LOG` to override the default `schema_check=info,campusforms_core=info`
//! filter.

use anyhow::{bail, Context};
use campusforms_core::visibility::{filter_visible_fields, missing_required_fields};
use campusforms_core::wire::{ambiguous_rule_targets, parse_schema_value, values_by_label};
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("schema_check=info,campusforms_core=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: schema-check <schema.json> [Label=Value ...]");
    };

    let mut answers = HashMap::new();
    for arg in args {
        let Some((label, value)) = arg.split_once('=') else {
            bail!("answer '{}' is not in Label=Value form", arg);
        };
        answers.insert(label.to_string(), value.to_string());
    }

    let contents = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read {}", path))?;
    let mut document: serde_json::Value =
        serde_json::from_str(&contents).with_context(|| format!("{} is not valid JSON", path))?;
    if let Some(embedded) = document.get_mut("form_schema") {
        tracing::debug!("Using embedded form_schema from {}", path);
        document = embedded.take();
    }

    let schema = parse_schema_value(document).with_context(|| format!("invalid schema in {}", path))?;
    tracing::info!("Loaded {} fields from {}", schema.len(), path);

    let values = values_by_label(&schema, &answers);
    if values.len() < answers.len() {
        tracing::warn!(
            "{} answer(s) matched no field label",
            answers.len() - values.len()
        );
    }

    println!("Visible fields:");
    for field in filter_visible_fields(&schema, &values) {
        let answer = values.get(&field.id).map(String::as_str).unwrap_or("");
        println!(
            "  [{}] {} ({}{}) = {:?}",
            field.id,
            field.label,
            field.field_type,
            if field.required { ", required" } else { "" },
            answer
        );
    }

    let missing = missing_required_fields(&schema, &values);
    if missing.is_empty() {
        println!("All visible required fields answered.");
    } else {
        println!("Missing required answers:");
        for field in &missing {
            println!("  [{}] {}", field.id, field.label);
        }
    }

    let ambiguous = ambiguous_rule_targets(&schema);
    if !ambiguous.is_empty() {
        println!("Rules that resolve to another field after saving:");
        for id in ambiguous {
            if let Some(field) = schema.get(id) {
                println!("  [{}] {}", field.id, field.label);
            }
        }
    }

    if !missing.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}
