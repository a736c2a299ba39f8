//! Ordering bulk-loaded entities by the caller's requested keys.
//!
//! `WHERE uuid = ANY($1)` returns rows in whatever order the database likes.
//! Loaders hand the rows back in the order the caller asked for them.

use std::collections::HashMap;
use std::hash::Hash;

/// Order `items` by `keys`.
///
/// Keys without a matching item are skipped and items whose key was not
/// requested are dropped. A key requested more than once yields its item
/// once, at the first position it was requested.
pub fn sort_by_requested_keys<K, T, F>(keys: &[K], items: Vec<T>, key_of: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> &K,
{
    let mut position: HashMap<&K, usize> = HashMap::with_capacity(keys.len());
    for (index, key) in keys.iter().enumerate() {
        position.entry(key).or_insert(index);
    }

    let mut slots: Vec<Option<T>> = std::iter::repeat_with(|| None).take(keys.len()).collect();
    for item in items {
        if let Some(&index) = position.get(key_of(&item))
            && let Some(slot) = slots.get_mut(index)
            && slot.is_none()
        {
            *slot = Some(item);
        }
    }

    slots.into_iter().flatten().collect()
}
