//! Display tree for parent-linked entities
//!
//! Menu items arrive as a flat list where children point at their parent.
//! Reordering only ever touches one sibling group, but rendering walks the
//! whole hierarchy at any depth.

use super::OrderedEntity;

/// One entity and its children, in display order
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode<'a, T> {
    pub item: &'a T,
    pub depth: usize,
    pub children: Vec<TreeNode<'a, T>>,
}

/// Build the display tree of a flat, parent-linked list
///
/// Siblings are sorted by order (list position breaks ties). Items whose
/// parent is not in the list are promoted to roots. Items caught in a parent
/// cycle are never dropped: the first one encountered becomes a root.
pub fn build_tree<T: OrderedEntity>(items: &[T]) -> Vec<TreeNode<'_, T>> {
    let mut visited = vec![false; items.len()];
    let mut roots = Vec::new();

    let mut root_indices: Vec<usize> = (0..items.len())
        .filter(|&index| match items[index].parent_id() {
            None => true,
            Some(parent) => !items.iter().any(|other| other.entity_id() == parent),
        })
        .collect();
    root_indices.sort_by_key(|&index| (items[index].order(), index));

    for index in root_indices {
        roots.push(attach(items, index, 0, &mut visited));
    }

    while let Some(index) = visited.iter().position(|seen| !seen) {
        tracing::warn!(
            "Parent cycle detected at {:?}; rendering it as a root",
            items[index].entity_id()
        );
        roots.push(attach(items, index, 0, &mut visited));
    }

    roots
}

fn attach<'a, T: OrderedEntity>(
    items: &'a [T],
    index: usize,
    depth: usize,
    visited: &mut [bool],
) -> TreeNode<'a, T> {
    visited[index] = true;
    let id = items[index].entity_id();

    let mut child_indices: Vec<usize> = (0..items.len())
        .filter(|&child| !visited[child] && items[child].parent_id() == Some(id))
        .collect();
    child_indices.sort_by_key(|&child| (items[child].order(), child));

    let mut children = Vec::with_capacity(child_indices.len());
    for child in child_indices {
        // A shallower branch may have claimed it already
        if !visited[child] {
            children.push(attach(items, child, depth + 1, visited));
        }
    }

    TreeNode {
        item: &items[index],
        depth,
        children,
    }
}

/// Depth-first rows of a display tree as `(depth, item)`
pub fn flatten<'a, T>(nodes: &[TreeNode<'a, T>]) -> Vec<(usize, &'a T)> {
    let mut rows = Vec::new();
    push_rows(nodes, &mut rows);
    rows
}

fn push_rows<'a, T>(nodes: &[TreeNode<'a, T>], rows: &mut Vec<(usize, &'a T)>) {
    for node in nodes {
        rows.push((node.depth, node.item));
        push_rows(&node.children, rows);
    }
}
