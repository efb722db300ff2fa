//! Data Models
//!
//! This module contains the data structures edited by the admin panel's
//! builders:
//!
//! - `FieldDefinition` / `FormSchema` - dynamic forms with conditional fields
//! - `Menu` / `MenuItem` - navigation menus with a two-level link tree
//! - `PageDraft` - page-builder rows and their column content
//!
//! Every reorderable type implements [`crate::ordering::OrderedEntity`].

mod error;
mod field;
mod menu;
mod page;
mod schema;

pub use error::SchemaError;
pub use field::{FieldDefinition, FieldId, FieldPatch, FieldType, VisibilityRule};
pub use menu::{Menu, MenuId, MenuItem, MenuItemId};
pub use page::{
    slugify, ColumnContent, ColumnKind, FileEntry, PageDraft, PageSection, SectionId,
    DEFAULT_MAX_COLUMNS,
};
pub use schema::FormSchema;
