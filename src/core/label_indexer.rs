use crate::domain::model::{ExpandedLabelInstance, ProductId};
use std::collections::{BTreeMap, HashSet};

/// Emits one instance per physical label, numbered from each product's start index.
///
/// Products are visited in `product_ids` order; a repeated id is visited once.
/// A product missing from `quantities` emits nothing, one missing from
/// `start_indexes` starts at 1. Numbering stops short of `u32::MAX`.
pub fn expand(
    product_ids: &[ProductId],
    quantities: &BTreeMap<ProductId, u32>,
    start_indexes: &BTreeMap<ProductId, u32>,
) -> Vec<ExpandedLabelInstance> {
    let mut seen = HashSet::new();
    let mut instances = Vec::new();

    for &product_id in product_ids {
        if !seen.insert(product_id) {
            continue;
        }

        let quantity = quantities.get(&product_id).copied().unwrap_or(0);
        let start = start_indexes.get(&product_id).copied().unwrap_or(1);

        instances.extend((start..start.saturating_add(quantity)).map(|label_index| ExpandedLabelInstance {
            product_id,
            label_index,
        }));
    }

    instances
}

/// Expansion of a whole request as a single implicit chunk: every product starts at 1.
pub fn expand_unchunked(
    product_ids: &[ProductId],
    quantities: &BTreeMap<ProductId, u32>,
) -> Vec<ExpandedLabelInstance> {
    expand(product_ids, quantities, &BTreeMap::new())
}
