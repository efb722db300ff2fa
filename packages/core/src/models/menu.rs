//! Navigation Menus
//!
//! Menus are top-level navigation groups (header, footer, quick links) holding
//! a two-level tree of links. Items arrive from the backend either nested
//! (`children`) or flat with `parent_id` links; both shapes reorder within
//! their own sibling group only.

use crate::ordering::{
    self, build_tree, flatten, Direction, OrderedEntity, ReorderOutcome,
};
use serde::{Deserialize, Serialize};

pub type MenuId = i64;
pub type MenuItemId = i64;

fn default_true() -> bool {
    true
}

/// A navigation menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub id: MenuId,

    pub name: String,

    #[serde(default)]
    pub slug: String,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub order: i64,

    #[serde(default)]
    pub items: Vec<MenuItem>,
}

/// A link inside a menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,

    pub menu_id: MenuId,

    /// `None` for top-level links
    #[serde(default)]
    pub parent_id: Option<MenuItemId>,

    pub title: String,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub order: i64,

    /// Top-level link that opens a multi-column dropdown
    #[serde(default)]
    pub is_mega_menu: bool,

    /// Column heading a child link is grouped under inside a mega menu
    #[serde(default)]
    pub column_title: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    pub fn new(id: MenuItemId, menu_id: MenuId, title: impl Into<String>) -> Self {
        Self {
            id,
            menu_id,
            parent_id: None,
            title: title.into(),
            url: None,
            order: 0,
            is_mega_menu: false,
            column_title: None,
            children: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent_id: MenuItemId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

impl OrderedEntity for Menu {
    type Id = MenuId;

    fn entity_id(&self) -> &MenuId {
        &self.id
    }

    fn order(&self) -> i64 {
        self.order
    }

    fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}

impl OrderedEntity for MenuItem {
    type Id = MenuItemId;

    fn entity_id(&self) -> &MenuItemId {
        &self.id
    }

    fn parent_id(&self) -> Option<&MenuItemId> {
        self.parent_id.as_ref()
    }

    fn order(&self) -> i64 {
        self.order
    }

    fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}

impl Menu {
    pub fn new(id: MenuId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            slug: String::new(),
            is_active: true,
            order: 0,
            items: Vec::new(),
        }
    }

    /// Find an item at any depth
    pub fn find_item(&self, id: MenuItemId) -> Option<&MenuItem> {
        find_in(&self.items, id)
    }

    /// Move a link one step within its sibling group
    ///
    /// Works on nested and flat item lists alike; never moves a link to
    /// another parent. Unknown ids and end-of-group moves return `None`.
    pub fn move_item(&mut self, id: MenuItemId, direction: Direction) -> Option<ReorderOutcome<MenuItemId>> {
        let group = sibling_group_mut(&mut self.items, id)?;
        ordering::move_entity(group, &id, direction)
    }

    /// Order a new link under `parent` should receive
    pub fn next_item_order(&self, parent: Option<MenuItemId>) -> i64 {
        let flat = self.flat_items();
        ordering::next_order(flat.iter().filter(|item| item.parent_id == parent))
    }

    /// All links as a flat, parent-linked list
    ///
    /// Nested children are hoisted with their `parent_id` set and their own
    /// `children` emptied.
    pub fn flat_items(&self) -> Vec<MenuItem> {
        let mut flat = Vec::new();
        hoist(&self.items, None, &mut flat);
        flat
    }

    /// Links in display order as `(depth, item)`, at any depth
    pub fn display_rows(&self) -> Vec<(usize, MenuItem)> {
        let flat = self.flat_items();
        flatten(&build_tree(&flat))
            .into_iter()
            .map(|(depth, item)| (depth, item.clone()))
            .collect()
    }
}

fn find_in(items: &[MenuItem], id: MenuItemId) -> Option<&MenuItem> {
    for item in items {
        if item.id == id {
            return Some(item);
        }
        if let Some(found) = find_in(&item.children, id) {
            return Some(found);
        }
    }
    None
}

fn sibling_group_mut(items: &mut Vec<MenuItem>, id: MenuItemId) -> Option<&mut Vec<MenuItem>> {
    if items.iter().any(|item| item.id == id) {
        return Some(items);
    }
    for item in items.iter_mut() {
        if let Some(group) = sibling_group_mut(&mut item.children, id) {
            return Some(group);
        }
    }
    None
}

fn hoist(items: &[MenuItem], parent: Option<MenuItemId>, out: &mut Vec<MenuItem>) {
    for item in items {
        let mut flat = item.clone();
        flat.children = Vec::new();
        if parent.is_some() {
            flat.parent_id = parent;
        }
        out.push(flat);
        hoist(&item.children, Some(item.id), out);
    }
}
