use crate::domain::measure_unit::MeasureUnit;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type ProductId = u64;
pub type OrderId = u64;

/// Stable key of a label destination, e.g. `branch_12` or `grouper_3`.
pub type DestinationId = String;

/// One order line relevant to HORECA label generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderFact {
    pub order_id: OrderId,
    pub destination_id: DestinationId,
    pub destination_display_name: String,
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Ingredient line of a plated dish, per unit of the dish's product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientSpec {
    pub product_id: ProductId,
    pub ingredient_name: String,
    pub measure_unit: MeasureUnit,
    pub per_unit_quantity: Decimal,
    /// `None` means a single label carries the whole total.
    #[serde(default)]
    pub max_quantity_per_label: Option<Decimal>,
    #[serde(default)]
    pub sequence_index: u32,
    #[serde(default)]
    pub shelf_life_days: Option<u32>,
}

/// Total of one ingredient needed at one destination, already split into label weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelGroup {
    pub destination_id: DestinationId,
    pub destination_display_name: String,
    pub ingredient_name: String,
    pub ingredient_code: Option<String>,
    pub measure_unit: MeasureUnit,
    pub total_quantity_needed: Decimal,
    pub max_quantity_per_label: Option<Decimal>,
    pub labels_count: usize,
    pub weights: Vec<Decimal>,
    pub shelf_life_days: Option<u32>,
}

/// Two specs for the same ingredient at the same destination that disagree.
/// The first-encountered spec wins; this is kept for the caller to inspect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecConflict {
    pub destination_id: DestinationId,
    pub ingredient_name: String,
    pub kept_product_id: ProductId,
    pub conflicting_product_id: ProductId,
    pub kept_measure_unit: MeasureUnit,
    pub conflicting_measure_unit: MeasureUnit,
    pub kept_max_quantity: Option<Decimal>,
    pub conflicting_max_quantity: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationReport {
    pub groups: Vec<LabelGroup>,
    pub conflicts: Vec<SpecConflict>,
}

fn default_quantity() -> u32 {
    1
}

/// A validated product requested for nutritional labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSelection {
    pub product_id: ProductId,
    #[serde(default)]
    pub production_area_name: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl ProductSelection {
    pub fn new(product_id: ProductId, production_area_name: Option<&str>, quantity: u32) -> Self {
        Self {
            product_id,
            production_area_name: production_area_name.map(str::to_string),
            quantity,
        }
    }
}

/// A bounded slice of one production area's labels, with the numbering each product resumes at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelChunk {
    pub area_name: String,
    /// Distinct products in order of first appearance within the chunk.
    pub product_ids: Vec<ProductId>,
    pub quantities: BTreeMap<ProductId, u32>,
    pub chunk_number: usize,
    pub total_chunks_in_area: usize,
    pub label_count: usize,
    pub first_product_id: ProductId,
    pub last_product_id: ProductId,
    pub product_start_indexes: BTreeMap<ProductId, u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedLabelInstance {
    pub product_id: ProductId,
    pub label_index: u32,
}

/// Output of the nutritional preparation step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PreparedLabels {
    pub chunks: Vec<LabelChunk>,
    pub total_labels: usize,
    pub valid_product_ids: Vec<ProductId>,
    pub not_found_ids: Vec<ProductId>,
}

/// One physical HORECA label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HorecaLabel {
    pub ingredient_name: String,
    pub ingredient_code: Option<String>,
    pub destination_display_name: String,
    pub measure_unit: MeasureUnit,
    pub net_weight: Decimal,
    pub net_content: String,
    pub shelf_life_days: Option<u32>,
    pub elaboration_date: String,
}

/// One physical nutritional label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionalLabel {
    pub area_name: String,
    pub product_id: ProductId,
    pub product_name: String,
    pub label_index: u32,
    pub elaboration_date: String,
    pub production_order_code: Option<String>,
}

/// A unit of downstream work: one file of label records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelBatch<R> {
    pub file_stem: String,
    pub description: String,
    pub records: Vec<R>,
}

/// A product as returned by the catalog's label-eligibility query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub production_area_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: u64,
    pub company_id: u64,
    #[serde(default)]
    pub fantasy_name: Option<String>,
}

/// Named set of branches and companies whose labels are consolidated together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportGrouper {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub display_order: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub branch_ids: Vec<u64>,
    #[serde(default)]
    pub company_ids: Vec<u64>,
}

fn default_active() -> bool {
    true
}
