//! CampusForms Core
//!
//! Schema engine behind the CMS form, menu and page builders.
//!
//! # Architecture
//!
//! - **Id-keyed rules**: visibility rules reference their trigger field by id;
//!   labels only appear at the persisted boundary
//! - **Sibling ordering**: menus, menu items, sections and form fields share one
//!   swap-based reorder routine
//! - **Label-joined wire format**: schemas round-trip through the JSON array
//!   stored on events and pages
//!
//! # Modules
//!
//! - [`models`] - Form fields and schemas, menus, page drafts
//! - [`ordering`] - Sibling reorder and menu tree assembly
//! - [`visibility`] - Conditional field visibility
//! - [`wire`] - Persisted schema codec
//! - [`draft`] - Local page draft storage and debounced autosave
//! - [`config`] - Builder configuration

pub mod config;
pub mod draft;
pub mod models;
pub mod ordering;
pub mod visibility;
pub mod wire;

// Re-export commonly used types
pub use config::BuilderConfig;
pub use draft::{DraftAutosaver, DraftError, DraftSnapshot, DraftStore, FileDraftStore, MemoryDraftStore};
pub use models::*;
pub use ordering::{Direction, OrderAssignment, OrderedEntity, OrderedEntityList, ReorderOutcome};
pub use visibility::{filter_visible_fields, is_field_visible, missing_required_fields, FieldValues};
pub use wire::{parse_schema, schema_to_json, WireError, WireField};
