use crate::domain::model::{LabelChunk, ProductId};
use std::collections::BTreeMap;

/// Labels already assigned per product in the chunks emitted so far for one area.
pub type AssignedLabels = BTreeMap<ProductId, u32>;

/// Partitions one area's expanded product list into chunks of at most `chunk_size` labels.
///
/// Each chunk records where every product's numbering resumes: a product first
/// seen in chunk *k* starts at 1, a product continued from earlier chunks starts
/// one past the last index it got there. Counters never cross areas, so call this
/// once per area. A `chunk_size` of 0 is treated as 1.
pub fn plan(area_name: &str, expanded_product_ids: &[ProductId], chunk_size: usize) -> Vec<LabelChunk> {
    let slices: Vec<&[ProductId]> = expanded_product_ids.chunks(chunk_size.max(1)).collect();
    let total_chunks = slices.len();

    let mut assigned = AssignedLabels::new();
    let mut chunks = Vec::with_capacity(total_chunks);

    for (index, slice) in slices.into_iter().enumerate() {
        let (chunk, next) = plan_chunk(area_name, slice, index + 1, total_chunks, assigned);
        assigned = next;
        chunks.push(chunk);
    }

    chunks
}

/// Builds one chunk from the labels assigned before it and returns the updated counters.
pub fn plan_chunk(
    area_name: &str,
    slice: &[ProductId],
    chunk_number: usize,
    total_chunks_in_area: usize,
    mut assigned: AssignedLabels,
) -> (LabelChunk, AssignedLabels) {
    let mut product_ids = Vec::new();
    let mut quantities: BTreeMap<ProductId, u32> = BTreeMap::new();

    for &product_id in slice {
        let count = quantities.entry(product_id).or_insert(0);
        if *count == 0 {
            product_ids.push(product_id);
        }
        *count += 1;
    }

    let mut product_start_indexes = BTreeMap::new();
    for (&product_id, &quantity) in &quantities {
        let already = assigned.entry(product_id).or_insert(0);
        product_start_indexes.insert(product_id, already.saturating_add(1));
        *already = already.saturating_add(quantity);
    }

    let chunk = LabelChunk {
        area_name: area_name.to_string(),
        first_product_id: slice.iter().min().copied().unwrap_or_default(),
        last_product_id: slice.iter().max().copied().unwrap_or_default(),
        product_ids,
        quantities,
        chunk_number,
        total_chunks_in_area,
        label_count: slice.len(),
        product_start_indexes,
    };

    tracing::debug!(
        "Planned '{}' chunk {}/{} with {} label(s), start indexes {:?}",
        chunk.area_name,
        chunk.chunk_number,
        chunk.total_chunks_in_area,
        chunk.label_count,
        chunk.product_start_indexes
    );

    (chunk, assigned)
}
