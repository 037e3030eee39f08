use crate::core::splitter;
use crate::domain::model::{
    AggregationReport, DestinationId, IngredientSpec, LabelGroup, OrderFact, ProductId, SpecConflict,
};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

/// Separator between an ingredient's product code and its description.
pub const CODE_DELIMITER: &str = " - ";

/// `"MZC - CONSOME DE POLLO GRANEL"` → `Some("MZC")`.
pub fn ingredient_code(ingredient_name: &str) -> Option<String> {
    ingredient_name
        .split_once(CODE_DELIMITER)
        .map(|(code, _)| code.trim().to_string())
}

struct IngredientTotal {
    spec: IngredientSpec,
    total: Decimal,
}

struct DestinationBucket {
    id: DestinationId,
    display_name: String,
    ingredients: Vec<IngredientTotal>,
    by_name: HashMap<String, usize>,
}

impl DestinationBucket {
    fn new(id: &str, display_name: &str) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            ingredients: Vec::new(),
            by_name: HashMap::new(),
        }
    }
}

/// Groups order lines by destination and ingredient and splits each total into label weights.
pub fn aggregate(
    order_facts: &[OrderFact],
    specs_by_product: &HashMap<ProductId, Vec<IngredientSpec>>,
) -> Vec<LabelGroup> {
    aggregate_with_report(order_facts, specs_by_product).groups
}

/// Same as [`aggregate`], also returning the spec conflicts met along the way.
///
/// Output order: destinations by first appearance in `order_facts`, and within
/// a destination by the ingredient's `sequence_index`, ties by first appearance.
/// When specs for one ingredient disagree the first one wins. A contribution in
/// a different measure unit is left out of the total rather than summed.
pub fn aggregate_with_report(
    order_facts: &[OrderFact],
    specs_by_product: &HashMap<ProductId, Vec<IngredientSpec>>,
) -> AggregationReport {
    let mut buckets: Vec<DestinationBucket> = Vec::new();
    let mut bucket_index: HashMap<&str, usize> = HashMap::new();
    let mut conflicts = Vec::new();
    let mut reported: HashSet<(DestinationId, String, ProductId)> = HashSet::new();

    for fact in order_facts {
        let bucket_pos = *bucket_index
            .entry(fact.destination_id.as_str())
            .or_insert_with(|| {
                buckets.push(DestinationBucket::new(
                    &fact.destination_id,
                    &fact.destination_display_name,
                ));
                buckets.len() - 1
            });
        let bucket = &mut buckets[bucket_pos];

        let specs = match specs_by_product.get(&fact.product_id) {
            Some(specs) if !specs.is_empty() => specs,
            _ => {
                tracing::debug!(
                    "Order {} product {} has no ingredient breakdown, skipping",
                    fact.order_id,
                    fact.product_id
                );
                continue;
            }
        };

        for spec in specs {
            let Some(contribution) = Decimal::from(fact.quantity).checked_mul(spec.per_unit_quantity)
            else {
                tracing::warn!(
                    "Order {}: {} x {} of '{}' overflows, skipping contribution",
                    fact.order_id,
                    fact.quantity,
                    spec.per_unit_quantity,
                    spec.ingredient_name
                );
                continue;
            };

            let Some(&pos) = bucket.by_name.get(&spec.ingredient_name) else {
                bucket
                    .by_name
                    .insert(spec.ingredient_name.clone(), bucket.ingredients.len());
                bucket.ingredients.push(IngredientTotal {
                    spec: spec.clone(),
                    total: contribution,
                });
                continue;
            };

            let entry = &mut bucket.ingredients[pos];
            let same_unit = entry.spec.measure_unit == spec.measure_unit;
            let same_max = entry.spec.max_quantity_per_label == spec.max_quantity_per_label;

            if !(same_unit && same_max) {
                let key = (bucket.id.clone(), spec.ingredient_name.clone(), spec.product_id);
                if reported.insert(key) {
                    tracing::warn!(
                        "Inconsistent specs for '{}' at {}: product {} has {} max {:?}, product {} has {} max {:?}; keeping the first",
                        spec.ingredient_name,
                        bucket.id,
                        entry.spec.product_id,
                        entry.spec.measure_unit,
                        entry.spec.max_quantity_per_label,
                        spec.product_id,
                        spec.measure_unit,
                        spec.max_quantity_per_label
                    );
                    conflicts.push(SpecConflict {
                        destination_id: bucket.id.clone(),
                        ingredient_name: spec.ingredient_name.clone(),
                        kept_product_id: entry.spec.product_id,
                        conflicting_product_id: spec.product_id,
                        kept_measure_unit: entry.spec.measure_unit,
                        conflicting_measure_unit: spec.measure_unit,
                        kept_max_quantity: entry.spec.max_quantity_per_label,
                        conflicting_max_quantity: spec.max_quantity_per_label,
                    });
                }
            }

            if same_unit {
                match entry.total.checked_add(contribution) {
                    Some(total) => entry.total = total,
                    None => tracing::warn!(
                        "Order {}: total of '{}' at {} overflows, skipping contribution",
                        fact.order_id,
                        spec.ingredient_name,
                        bucket.id
                    ),
                }
            }
        }
    }

    let mut groups = Vec::new();
    for mut bucket in buckets {
        // stable: ties keep first-appearance order
        bucket.ingredients.sort_by_key(|ingredient| ingredient.spec.sequence_index);

        for ingredient in bucket.ingredients {
            let weights = splitter::split(ingredient.total, ingredient.spec.max_quantity_per_label);
            tracing::debug!(
                "{} / {}: {} {} in {} label(s)",
                bucket.display_name,
                ingredient.spec.ingredient_name,
                ingredient.total,
                ingredient.spec.measure_unit,
                weights.len()
            );

            groups.push(LabelGroup {
                destination_id: bucket.id.clone(),
                destination_display_name: bucket.display_name.clone(),
                ingredient_code: ingredient_code(&ingredient.spec.ingredient_name),
                ingredient_name: ingredient.spec.ingredient_name,
                measure_unit: ingredient.spec.measure_unit,
                total_quantity_needed: ingredient.total,
                max_quantity_per_label: ingredient.spec.max_quantity_per_label,
                labels_count: weights.len(),
                weights,
                shelf_life_days: ingredient.spec.shelf_life_days,
            });
        }
    }

    AggregationReport { groups, conflicts }
}
