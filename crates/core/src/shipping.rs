//! Shipment eligibility per shop.
//!
//! A dispatch (shipping method) can forbid product categories. A shop only
//! offers a dispatch if at least one category reachable from the shop's root
//! is not forbidden for it.

use std::collections::{HashMap, HashSet};

use crate::types::{CategoryId, DispatchId};

/// Filter `dispatch_ids` down to the dispatches usable in a shop.
///
/// A dispatch is excluded iff it has forbidden-category entries and every
/// reachable category is among them. Dispatches without entries are always
/// eligible, so a shop whose reachable set is empty still keeps those.
/// Entries for dispatch ids not in `dispatch_ids` are ignored. The output keeps
/// the order of `dispatch_ids`.
#[must_use]
pub fn eligible_dispatch_ids<S: std::hash::BuildHasher>(
    dispatch_ids: &[DispatchId],
    reachable: &HashSet<CategoryId, S>,
    forbidden_by_dispatch: &HashMap<DispatchId, Vec<CategoryId>>,
) -> Vec<DispatchId> {
    dispatch_ids
        .iter()
        .copied()
        .filter(|id| {
            forbidden_by_dispatch
                .get(id)
                .is_none_or(|forbidden| !forbids_everything(reachable, forbidden))
        })
        .collect()
}

fn forbids_everything<S: std::hash::BuildHasher>(
    reachable: &HashSet<CategoryId, S>,
    forbidden: &[CategoryId],
) -> bool {
    reachable.iter().all(|category| forbidden.contains(category))
}

/// Group `(dispatch_id, category_id)` join rows by dispatch.
#[must_use]
pub fn group_forbidden_categories(
    rows: impl IntoIterator<Item = (DispatchId, CategoryId)>,
) -> HashMap<DispatchId, Vec<CategoryId>> {
    let mut grouped: HashMap<DispatchId, Vec<CategoryId>> = HashMap::new();
    for (dispatch_id, category_id) in rows {
        grouped.entry(dispatch_id).or_default().push(category_id);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[i32]) -> Vec<DispatchId> {
        raw.iter().copied().map(DispatchId::new).collect()
    }

    fn categories(raw: &[i32]) -> HashSet<CategoryId> {
        raw.iter().copied().map(CategoryId::new).collect()
    }

    #[test]
    fn test_dispatch_forbidding_every_reachable_category_is_excluded() {
        let reachable = categories(&[5, 12]);
        let forbidden = group_forbidden_categories([
            (DispatchId::new(1), CategoryId::new(5)),
            (DispatchId::new(1), CategoryId::new(12)),
            (DispatchId::new(2), CategoryId::new(5)),
        ]);

        let eligible = eligible_dispatch_ids(&ids(&[1, 2, 3]), &reachable, &forbidden);
        assert_eq!(eligible, ids(&[2, 3]));
    }

    #[test]
    fn test_forbidden_superset_still_excludes() {
        let reachable = categories(&[5]);
        let forbidden = group_forbidden_categories([
            (DispatchId::new(1), CategoryId::new(5)),
            (DispatchId::new(1), CategoryId::new(99)),
        ]);

        assert!(eligible_dispatch_ids(&ids(&[1]), &reachable, &forbidden).is_empty());
    }

    #[test]
    fn test_empty_reachable_set_excludes_restricted_dispatches_only() {
        let reachable = categories(&[]);
        let forbidden = group_forbidden_categories([(DispatchId::new(1), CategoryId::new(5))]);

        let eligible = eligible_dispatch_ids(&ids(&[1, 2]), &reachable, &forbidden);
        assert_eq!(eligible, ids(&[2]));
    }

    #[test]
    fn test_entries_for_unknown_dispatch_are_ignored() {
        let reachable = categories(&[5]);
        let forbidden = group_forbidden_categories([(DispatchId::new(42), CategoryId::new(5))]);

        let eligible = eligible_dispatch_ids(&ids(&[1]), &reachable, &forbidden);
        assert_eq!(eligible, ids(&[1]));
    }

    #[test]
    fn test_output_keeps_input_order() {
        let reachable = categories(&[5]);
        let forbidden = HashMap::new();

        let eligible = eligible_dispatch_ids(&ids(&[9, 3, 7]), &reachable, &forbidden);
        assert_eq!(eligible, ids(&[9, 3, 7]));
    }
}
