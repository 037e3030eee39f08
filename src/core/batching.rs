use crate::domain::model::{HorecaLabel, LabelBatch, LabelChunk, LabelGroup};

/// One physical label per weight, in group order.
pub fn expand_horeca_labels(groups: &[LabelGroup], elaboration_date: &str) -> Vec<HorecaLabel> {
    groups
        .iter()
        .flat_map(|group| {
            group.weights.iter().map(move |weight| HorecaLabel {
                ingredient_name: group.ingredient_name.clone(),
                ingredient_code: group.ingredient_code.clone(),
                destination_display_name: group.destination_display_name.clone(),
                measure_unit: group.measure_unit,
                net_weight: *weight,
                net_content: group.measure_unit.net_content(*weight),
                shelf_life_days: group.shelf_life_days,
                elaboration_date: elaboration_date.to_string(),
            })
        })
        .collect()
}

/// Splits physical HORECA labels into print batches of at most `labels_per_chunk`.
pub fn batch_horeca_labels(labels: Vec<HorecaLabel>, labels_per_chunk: usize) -> Vec<LabelBatch<HorecaLabel>> {
    let per_chunk = labels_per_chunk.max(1);
    let total_batches = labels.len().div_ceil(per_chunk);

    let mut batches = Vec::with_capacity(total_batches);
    let mut remaining = labels.into_iter().peekable();
    let mut batch_number = 0;

    while remaining.peek().is_some() {
        batch_number += 1;
        let records: Vec<HorecaLabel> = remaining.by_ref().take(per_chunk).collect();
        batches.push(LabelBatch {
            file_stem: format!("horeca_lote_{:03}", batch_number),
            description: format!(
                "Etiquetas HORECA: Lote {}/{} ({} etiqueta(s))",
                batch_number,
                total_batches,
                records.len()
            ),
            records,
        });
    }

    batches
}

pub fn nutritional_description(chunk: &LabelChunk, production_order_code: Option<&str>) -> String {
    let mut description = format!(
        "Etiquetas nutricionales: {} - Lote {}/{} ({} etiqueta(s), productos #{} a #{})",
        chunk.area_name,
        chunk.chunk_number,
        chunk.total_chunks_in_area,
        chunk.label_count,
        chunk.first_product_id,
        chunk.last_product_id
    );
    if let Some(code) = production_order_code {
        description.push_str(&format!(" - Orden de Producción: {}", code));
    }
    description
}

/// `nutricional_02_cocina_fria_lote_001`: the area's 1-based position keeps
/// areas whose slugs collide ("COCINA FRIA", "cocina-fria") in separate files.
pub fn nutritional_file_stem(area_ordinal: usize, area_name: &str, chunk_number: usize) -> String {
    format!(
        "nutricional_{:02}_{}_lote_{:03}",
        area_ordinal,
        area_slug(area_name),
        chunk_number
    )
}

/// `"COCINA FRÍA"` → `"cocina_fría"`; safe as a file name component.
pub fn area_slug(area_name: &str) -> String {
    let slug: String = area_name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    let collapsed = slug
        .split('_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");
    if collapsed.is_empty() {
        "area".to_string()
    } else {
        collapsed
    }
}
