use std::hash::Hash;

use indexmap::IndexMap;

use super::{Item, ItemId};

/// Partitions `items` by `key_fn`.
///
/// Keys keep first-seen order and every group keeps input order.
pub fn group_by<'a, T, K, F>(
    items: impl IntoIterator<Item = &'a T>,
    mut key_fn: F,
) -> IndexMap<K, Vec<&'a T>>
where
    T: 'a + ?Sized,
    K: Eq + Hash,
    F: FnMut(&'a T) -> K,
{
    let mut groups: IndexMap<K, Vec<&'a T>> = IndexMap::new();
    for item in items {
        groups.entry(key_fn(item)).or_default().push(item);
    }
    groups
}

/// Groups items sharing an id into one stacked lane.
#[must_use]
pub fn group_items_by_id(items: &[Item]) -> IndexMap<&ItemId, Vec<&Item>> {
    group_by(items, |item| &item.id)
}
