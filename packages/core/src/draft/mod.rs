//! Page-builder draft persistence
//!
//! A single local draft slot for a page that has not been created yet, plus
//! a debounced autosaver that writes to it while the admin edits.

mod autosave;
mod error;
mod store;

pub use autosave::DraftAutosaver;
pub use error::DraftError;
pub use store::{DraftSnapshot, DraftStore, FileDraftStore, MemoryDraftStore};
