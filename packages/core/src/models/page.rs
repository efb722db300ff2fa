//! Page Builder Model
//!
//! A page is a title, a slug, some main content and a list of layout rows
//! ("sections"). Each section holds one to `max_columns` columns, and each
//! column holds exactly one kind of content.
//!
//! ## Example Page Draft
//!
//! ```json
//! {
//!   "title": "Open Day 2026",
//!   "slug": "open-day-2026",
//!   "content": "",
//!   "banner_image": "",
//!   "banner_caption": "",
//!   "sections": [
//!     {
//!       "id": -1,
//!       "layout_type": "custom",
//!       "columns_count": 2,
//!       "order": 0,
//!       "column_data": [
//!         { "type": "hero", "heading": "Visit us", "content": "Tours every hour", "bg_image": "",
//!           "btn_text": "Book", "btn_url": "/book" },
//!         { "type": "form", "form_schema": [] }
//!       ]
//!     }
//!   ]
//! }
//! ```

use super::schema::FormSchema;
use crate::ordering::{self, Direction, OrderAssignment, OrderedEntity, ReorderOutcome};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Section identifier; negative for sections not yet saved
pub type SectionId = i64;

/// Default upper bound on columns per section
pub const DEFAULT_MAX_COLUMNS: usize = 4;

const SLUG_SEPARATOR_PATTERN: &str = r"[^a-z0-9]+";

/// A downloadable file listed in a Files column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub title: String,

    /// Encoded file payload (data URL) or stored path
    pub file_data: String,
}

/// Content of one column, one variant per content kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ColumnContent {
    Empty,
    Text {
        #[serde(default)]
        content: String,
    },
    Image {
        #[serde(default)]
        image: String,
        #[serde(default)]
        caption: String,
    },
    Hero {
        #[serde(default)]
        heading: String,
        /// Overlay text shown under the heading
        #[serde(default)]
        content: String,
        #[serde(default)]
        bg_image: String,
        #[serde(default)]
        btn_text: String,
        #[serde(default)]
        btn_url: String,
    },
    Form {
        #[serde(default)]
        form_schema: FormSchema,
    },
    Files {
        #[serde(default)]
        files_list: Vec<FileEntry>,
    },
}

/// Content kind selector, used when the admin switches a column's type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Empty,
    Text,
    Image,
    Hero,
    Form,
    Files,
}

impl ColumnContent {
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnContent::Empty => ColumnKind::Empty,
            ColumnContent::Text { .. } => ColumnKind::Text,
            ColumnContent::Image { .. } => ColumnKind::Image,
            ColumnContent::Hero { .. } => ColumnKind::Hero,
            ColumnContent::Form { .. } => ColumnKind::Form,
            ColumnContent::Files { .. } => ColumnKind::Files,
        }
    }

    /// Blank content of the given kind; a Form column starts with an empty schema
    pub fn blank(kind: ColumnKind) -> Self {
        match kind {
            ColumnKind::Empty => ColumnContent::Empty,
            ColumnKind::Text => ColumnContent::Text {
                content: String::new(),
            },
            ColumnKind::Image => ColumnContent::Image {
                image: String::new(),
                caption: String::new(),
            },
            ColumnKind::Hero => ColumnContent::Hero {
                heading: String::new(),
                content: String::new(),
                bg_image: String::new(),
                btn_text: String::new(),
                btn_url: String::new(),
            },
            ColumnKind::Form => ColumnContent::Form {
                form_schema: FormSchema::new(),
            },
            ColumnKind::Files => ColumnContent::Files {
                files_list: Vec::new(),
            },
        }
    }

    pub fn form_schema(&self) -> Option<&FormSchema> {
        match self {
            ColumnContent::Form { form_schema } => Some(form_schema),
            _ => None,
        }
    }
}

/// A layout row of the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSection {
    pub id: SectionId,

    #[serde(default)]
    pub layout_type: String,

    pub columns_count: usize,

    #[serde(default)]
    pub column_data: Vec<ColumnContent>,

    #[serde(default)]
    pub order: i64,
}

impl OrderedEntity for PageSection {
    type Id = SectionId;

    fn entity_id(&self) -> &SectionId {
        &self.id
    }

    fn order(&self) -> i64 {
        self.order
    }

    fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}

/// Page being created or edited in the builder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDraft {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub slug: String,

    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub banner_image: String,

    #[serde(default)]
    pub banner_caption: String,

    #[serde(default)]
    pub sections: Vec<PageSection>,
}

/// URL slug for a title: lowercase, non-alphanumeric runs become `-`,
/// leading and trailing dashes trimmed
pub fn slugify(title: &str) -> String {
    static SLUG_REGEX: OnceLock<Regex> = OnceLock::new();
    let slug_regex = SLUG_REGEX.get_or_init(|| Regex::new(SLUG_SEPARATOR_PATTERN).unwrap());

    let lowered = title.to_lowercase();
    slug_regex
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

impl PageDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title; new pages also derive their slug from it
    ///
    /// Existing pages keep their slug so published URLs stay stable.
    pub fn set_title(&mut self, title: impl Into<String>, is_new_page: bool) {
        self.title = title.into();
        if is_new_page {
            self.slug = slugify(&self.title);
        }
    }

    pub fn section(&self, id: SectionId) -> Option<&PageSection> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Append a one-column section with empty content
    ///
    /// Unsaved sections get negative ids below any existing one.
    pub fn add_section(&mut self, layout_type: impl Into<String>) -> SectionId {
        let id = self
            .sections
            .iter()
            .map(|s| s.id)
            .min()
            .map_or(-1, |lowest| lowest.min(0) - 1);

        self.sections.push(PageSection {
            id,
            layout_type: layout_type.into(),
            columns_count: 1,
            column_data: vec![ColumnContent::Empty],
            order: self.sections.len() as i64,
        });
        id
    }

    pub fn remove_section(&mut self, id: SectionId) -> Option<PageSection> {
        let position = self.sections.iter().position(|s| s.id == id)?;
        Some(self.sections.remove(position))
    }

    pub fn move_section(&mut self, id: SectionId, direction: Direction) -> Option<ReorderOutcome<SectionId>> {
        ordering::move_entity(&mut self.sections, &id, direction)
    }

    /// Rewrite section orders to `0..len` in display order
    ///
    /// A section added after a removal ties with the last one; normalize
    /// before persisting. Returns the changed assignments.
    pub fn normalize_sections(&mut self) -> Vec<OrderAssignment<SectionId>> {
        ordering::normalize_orders(&mut self.sections, None)
    }

    /// Resize a section, padding with empty columns or dropping trailing ones
    ///
    /// `count` is clamped to `1..=max_columns`. Returns `false` for an
    /// unknown section.
    pub fn set_column_count(&mut self, id: SectionId, count: usize, max_columns: usize) -> bool {
        let Some(section) = self.section_mut(id) else {
            return false;
        };

        let count = count.clamp(1, max_columns.max(1));
        section.column_data.resize(count, ColumnContent::Empty);
        section.columns_count = count;
        true
    }

    /// Switch a column to another content kind
    ///
    /// Choosing the kind the column already has keeps its content.
    pub fn set_column_kind(&mut self, id: SectionId, column: usize, kind: ColumnKind) -> bool {
        match self.column_mut(id, column) {
            Some(content) => {
                if content.kind() != kind {
                    *content = ColumnContent::blank(kind);
                }
                true
            }
            None => false,
        }
    }

    pub fn column_mut(&mut self, id: SectionId, column: usize) -> Option<&mut ColumnContent> {
        self.section_mut(id)?.column_data.get_mut(column)
    }

    /// Form schema of a Form column
    pub fn form_schema_mut(&mut self, id: SectionId, column: usize) -> Option<&mut FormSchema> {
        match self.column_mut(id, column)? {
            ColumnContent::Form { form_schema } => Some(form_schema),
            _ => None,
        }
    }

    /// Append a file to a Files column
    pub fn add_file(&mut self, id: SectionId, column: usize, file: FileEntry) -> bool {
        match self.column_mut(id, column) {
            Some(ColumnContent::Files { files_list }) => {
                files_list.push(file);
                true
            }
            _ => false,
        }
    }

    fn section_mut(&mut self, id: SectionId) -> Option<&mut PageSection> {
        self.sections.iter_mut().find(|s| s.id == id)
    }
}
