use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{Item, ItemId};

/// Ids of hierarchy nodes currently shown expanded.
///
/// Owned by the viewing session and passed by reference into every flatten
/// call. Only `toggle` mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionState {
    expanded: IndexSet<ItemId>,
}

impl ExpansionState {
    /// Nothing expanded: only top-level items are visible.
    #[must_use]
    pub fn collapsed() -> Self {
        Self::default()
    }

    /// Every id found anywhere in the tree.
    #[must_use]
    pub fn all_expanded(items: &[Item]) -> Self {
        Self {
            expanded: tree_ids(items),
        }
    }

    #[must_use]
    pub fn is_expanded(&self, id: &ItemId) -> bool {
        self.expanded.contains(id)
    }

    /// Adds `id` when absent, removes it when present. Returns the new state.
    pub fn toggle(&mut self, id: &ItemId) -> bool {
        if self.expanded.swap_remove(id) {
            false
        } else {
            self.expanded.insert(id.clone());
            true
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemId> {
        self.expanded.iter()
    }
}

impl FromIterator<ItemId> for ExpansionState {
    fn from_iter<T: IntoIterator<Item = ItemId>>(iter: T) -> Self {
        Self {
            expanded: iter.into_iter().collect(),
        }
    }
}

/// Ids of every node in the tree, parents before their children.
#[must_use]
pub fn tree_ids(items: &[Item]) -> IndexSet<ItemId> {
    let mut ids = IndexSet::new();
    let mut stack: SmallVec<[&Item; 32]> = items.iter().rev().collect();
    while let Some(item) = stack.pop() {
        ids.insert(item.id.clone());
        stack.extend(item.children.iter().rev());
    }
    ids
}

/// One visible line of a flattened hierarchy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlattenedRow<'a> {
    pub item: &'a Item,
    pub depth: usize,
    pub parent_id: Option<&'a ItemId>,
}

impl FlattenedRow<'_> {
    /// Whether this row's children are part of the flattened output.
    #[must_use]
    pub fn is_expanded(&self, expansion: &ExpansionState) -> bool {
        self.item.has_children() && expansion.is_expanded(&self.item.id)
    }
}

/// Depth-first pre-order listing of `items`, descending only into nodes whose
/// id is in `expansion`.
///
/// Uses an explicit worklist so arbitrarily deep trees never grow the call
/// stack.
#[must_use]
pub fn flatten<'a>(items: &'a [Item], expansion: &ExpansionState) -> Vec<FlattenedRow<'a>> {
    let mut rows = Vec::with_capacity(items.len());
    let mut pending: SmallVec<[FlattenedRow<'a>; 32]> = items
        .iter()
        .rev()
        .map(|item| FlattenedRow {
            item,
            depth: 0,
            parent_id: None,
        })
        .collect();

    while let Some(row) = pending.pop() {
        if row.is_expanded(expansion) {
            let parent: &'a Item = row.item;
            let depth = row.depth + 1;
            pending.extend(parent.children.iter().rev().map(|child| FlattenedRow {
                item: child,
                depth,
                parent_id: Some(&parent.id),
            }));
        }
        rows.push(row);
    }

    rows
}
