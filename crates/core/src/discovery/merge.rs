//! Priority-ordered merge of per-query result lists.

use std::collections::HashSet;

use crate::external_catalog::CatalogItem;

/// Concatenate `lists` in order, keeping only the first occurrence of each
/// catalog id.
///
/// The relative order of first occurrences is preserved; nothing is
/// re-sorted. An item found by an earlier (higher priority) list is never
/// displaced by the same item in a later list.
pub fn merge_unique(lists: Vec<Vec<CatalogItem>>) -> Vec<CatalogItem> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged = Vec::new();

    for item in lists.into_iter().flatten() {
        if seen.insert(item.id.clone()) {
            merged.push(item);
        }
    }

    merged
}
