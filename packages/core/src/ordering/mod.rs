//! Sibling Ordering Engine
//!
//! Every reorderable list in the admin panel (menus, menu items, page sections,
//! program categories, form fields) is a list of entities carrying an integer
//! `order` and an optional parent reference. Siblings are the entities sharing
//! the same parent; they are totally ordered by `order`, with ties broken by
//! their position in the list.
//!
//! Moving an entity swaps its `order` value with the adjacent sibling and
//! resorts the list. Persisting a move means writing both entities back, so
//! [`move_entity`] returns a [`ReorderOutcome`] naming the two new values.
//!
//! # Example
//!
//! ```rust
//! use campusforms_core::ordering::{move_entity, Direction, OrderedEntity};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Category { id: i64, order: i64 }
//!
//! impl OrderedEntity for Category {
//!     type Id = i64;
//!     fn entity_id(&self) -> &i64 { &self.id }
//!     fn order(&self) -> i64 { self.order }
//!     fn set_order(&mut self, order: i64) { self.order = order; }
//! }
//!
//! let mut categories = vec![Category { id: 1, order: 0 }, Category { id: 2, order: 1 }];
//! let outcome = move_entity(&mut categories, &2, Direction::Up).unwrap();
//!
//! assert_eq!(categories[0].id, 2);
//! assert_eq!(outcome.moved.order, 0);
//! ```

pub mod tree;

pub use tree::{build_tree, flatten, TreeNode};

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// An entity that participates in sibling ordering
pub trait OrderedEntity {
    /// Identifier type, unique within the list
    type Id: PartialEq + Clone + Debug;

    /// Identifier of this entity
    fn entity_id(&self) -> &Self::Id;

    /// Parent identifier; `None` for top-level entities
    fn parent_id(&self) -> Option<&Self::Id> {
        None
    }

    /// Current order value among siblings
    fn order(&self) -> i64;

    /// Overwrite the order value
    fn set_order(&mut self, order: i64);
}

/// Direction of a single-step move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// New order value assigned to one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAssignment<Id> {
    pub id: Id,
    pub order: i64,
}

/// Result of a successful move: the two entities whose order changed
///
/// The backend has no batch reorder endpoint, so callers persist each
/// assignment with its own update call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderOutcome<Id> {
    /// The entity the user asked to move
    pub moved: OrderAssignment<Id>,

    /// The neighbour it traded places with
    pub displaced: OrderAssignment<Id>,
}

impl<Id> ReorderOutcome<Id> {
    /// Both assignments, moved entity first
    pub fn assignments(&self) -> [&OrderAssignment<Id>; 2] {
        [&self.moved, &self.displaced]
    }
}

/// Indices into `items` of the entities sharing `parent`, in display order
///
/// Display order is `order` ascending, ties broken by list position.
pub fn sibling_indices<T: OrderedEntity>(items: &[T], parent: Option<&T::Id>) -> Vec<usize> {
    let mut indices: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.parent_id() == parent)
        .map(|(index, _)| index)
        .collect();
    indices.sort_by_key(|&index| (items[index].order(), index));
    indices
}

/// Stable sort by order value
pub fn sort_by_order<T: OrderedEntity>(items: &mut [T]) {
    items.sort_by_key(|item| item.order());
}

/// Order value for an entity appended after all given siblings
///
/// Returns `max(order) + 1`, or `0` when there are no siblings.
pub fn next_order<'a, T, I>(siblings: I) -> i64
where
    T: OrderedEntity + 'a,
    I: IntoIterator<Item = &'a T>,
{
    siblings
        .into_iter()
        .map(|item| item.order())
        .max()
        .map_or(0, |max| max + 1)
}

/// Move one entity a single step among its siblings
///
/// The sibling group is every entity in `items` with the same parent as the
/// entity being moved; a move never crosses parents. Returns `None` and leaves
/// `items` untouched when the id is unknown or the move would leave the group
/// (first item up, last item down).
///
/// The two entities trade `order` values. When they already share a value,
/// the moved entity takes its own sibling index and the neighbour takes the
/// target index, so the values diverge from then on.
pub fn move_entity<T: OrderedEntity>(
    items: &mut [T],
    id: &T::Id,
    direction: Direction,
) -> Option<ReorderOutcome<T::Id>> {
    let position = items.iter().position(|item| item.entity_id() == id)?;
    let parent = items[position].parent_id().cloned();
    let siblings = sibling_indices(items, parent.as_ref());

    let current = siblings.iter().position(|&index| index == position)?;
    let target = match direction {
        Direction::Up => current.checked_sub(1)?,
        Direction::Down => current + 1,
    };
    if target >= siblings.len() {
        return None;
    }

    let (moved_index, displaced_index) = (siblings[current], siblings[target]);
    let mut moved_order = items[displaced_index].order();
    let mut displaced_order = items[moved_index].order();

    if moved_order == displaced_order {
        tracing::debug!(
            "Order tie ({}) between {:?} and {:?}; assigning sibling indices {} and {}",
            moved_order,
            items[moved_index].entity_id(),
            items[displaced_index].entity_id(),
            current,
            target
        );
        moved_order = current as i64;
        displaced_order = target as i64;
    }

    items[moved_index].set_order(moved_order);
    items[displaced_index].set_order(displaced_order);

    let outcome = ReorderOutcome {
        moved: OrderAssignment {
            id: items[moved_index].entity_id().clone(),
            order: moved_order,
        },
        displaced: OrderAssignment {
            id: items[displaced_index].entity_id().clone(),
            order: displaced_order,
        },
    };

    sort_by_order(items);
    Some(outcome)
}

/// Rewrite a sibling group's order values to `0..n` in display order
///
/// Returns only the assignments that actually changed.
pub fn normalize_orders<T: OrderedEntity>(
    items: &mut [T],
    parent: Option<&T::Id>,
) -> Vec<OrderAssignment<T::Id>> {
    let mut changed = Vec::new();

    for (rank, index) in sibling_indices(items, parent).into_iter().enumerate() {
        let rank = rank as i64;
        if items[index].order() != rank {
            items[index].set_order(rank);
            changed.push(OrderAssignment {
                id: items[index].entity_id().clone(),
                order: rank,
            });
        }
    }

    sort_by_order(items);
    changed
}

/// An owned list of ordered entities, kept sorted by order
///
/// Wraps the free functions in this module for screens that hold a whole
/// list (top-level menus, program categories).
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedEntityList<T> {
    items: Vec<T>,
}

impl<T> Default for OrderedEntityList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: OrderedEntity> OrderedEntityList<T> {
    /// Take ownership of loaded entities, sorting them by order
    pub fn new(mut items: Vec<T>) -> Self {
        sort_by_order(&mut items);
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_inner(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.entity_id() == id)
    }

    /// Siblings under `parent`, in display order
    pub fn siblings(&self, parent: Option<&T::Id>) -> Vec<&T> {
        sibling_indices(&self.items, parent)
            .into_iter()
            .map(|index| &self.items[index])
            .collect()
    }

    /// Order value an entity appended under `parent` should receive
    pub fn next_order_for(&self, parent: Option<&T::Id>) -> i64 {
        next_order(self.siblings(parent))
    }

    /// Append an entity after its current siblings
    ///
    /// Overwrites the entity's order with [`Self::next_order_for`] its parent.
    pub fn push_back(&mut self, mut item: T) -> i64 {
        let order = self.next_order_for(item.parent_id());
        item.set_order(order);
        self.items.push(item);
        sort_by_order(&mut self.items);
        order
    }

    /// Remove an entity by id
    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        let position = self.items.iter().position(|item| item.entity_id() == id)?;
        Some(self.items.remove(position))
    }

    /// Move an entity one step among its siblings, see [`move_entity`]
    pub fn move_item(&mut self, id: &T::Id, direction: Direction) -> Option<ReorderOutcome<T::Id>> {
        move_entity(&mut self.items, id, direction)
    }

    /// Normalize one sibling group, see [`normalize_orders`]
    pub fn normalize(&mut self, parent: Option<&T::Id>) -> Vec<OrderAssignment<T::Id>> {
        normalize_orders(&mut self.items, parent)
    }
}
