use crate::core::destination::DestinationResolver;
use crate::domain::measure_unit::MeasureUnit;
use crate::domain::model::{
    Branch, CatalogProduct, Company, IngredientSpec, OrderFact, OrderId, ProductId, ReportGrouper,
};
use crate::domain::ports::{HorecaLabelSource, ProductCatalog, Storage};
use crate::utils::error::{LabelError, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub companies: Vec<Company>,
    pub branches: Vec<Branch>,
    pub groupers: Vec<ReportGrouper>,
    pub orders: Vec<SnapshotOrder>,
    pub products: Vec<SnapshotProduct>,
    pub plated_dishes: Vec<PlatedDish>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotOrder {
    pub id: OrderId,
    #[serde(default)]
    pub branch_id: Option<u64>,
    #[serde(default)]
    pub company_id: Option<u64>,
    #[serde(default)]
    pub lines: Vec<SnapshotOrderLine>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotOrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotProduct {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub production_area: Option<String>,
    #[serde(default)]
    pub has_nutritional_information: bool,
    #[serde(default)]
    pub generate_label: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlatedDish {
    pub product_id: ProductId,
    #[serde(default)]
    pub is_horeca: bool,
    #[serde(default)]
    pub ingredients: Vec<DishIngredient>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DishIngredient {
    pub ingredient_name: String,
    pub measure_unit: MeasureUnit,
    pub quantity: Decimal,
    #[serde(default)]
    pub max_quantity_horeca: Option<Decimal>,
    #[serde(default)]
    pub shelf_life: Option<u32>,
    #[serde(default)]
    pub order_index: u32,
}

/// Read-only view over an exported JSON snapshot of orders and catalog data.
#[derive(Debug, Clone)]
pub struct JsonSnapshot {
    snapshot: Snapshot,
    resolver: DestinationResolver,
}

impl JsonSnapshot {
    pub fn new(snapshot: Snapshot) -> Self {
        let resolver = DestinationResolver::new(snapshot.groupers.iter().cloned());
        Self { snapshot, resolver }
    }

    pub fn from_slice(data: &[u8]) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_slice(data)?;
        tracing::debug!(
            "Loaded snapshot: {} order(s), {} product(s), {} plated dish(es)",
            snapshot.orders.len(),
            snapshot.products.len(),
            snapshot.plated_dishes.len()
        );
        Ok(Self::new(snapshot))
    }

    pub async fn load<S: Storage>(storage: &S, path: &str) -> Result<Self> {
        let data = storage.read_file(path).await?;
        Self::from_slice(&data)
    }

    fn horeca_dish(&self, product_id: ProductId) -> Option<&PlatedDish> {
        self.snapshot
            .plated_dishes
            .iter()
            .find(|dish| dish.product_id == product_id && dish.is_horeca)
    }

    fn company(&self, id: Option<u64>) -> Option<&Company> {
        id.and_then(|id| self.snapshot.companies.iter().find(|c| c.id == id))
    }
}

fn validate_ingredient(product_id: ProductId, ingredient: &DishIngredient) -> Result<()> {
    if ingredient.quantity < Decimal::ZERO {
        return Err(LabelError::ValidationError {
            message: format!(
                "ingredient '{}' of product {} has negative quantity {}",
                ingredient.ingredient_name, product_id, ingredient.quantity
            ),
        });
    }
    if let Some(max) = ingredient.max_quantity_horeca {
        if max < Decimal::ZERO {
            return Err(LabelError::ValidationError {
                message: format!(
                    "ingredient '{}' of product {} has negative max_quantity_horeca {}",
                    ingredient.ingredient_name, product_id, max
                ),
            });
        }
    }
    Ok(())
}

#[async_trait]
impl HorecaLabelSource for JsonSnapshot {
    async fn order_facts(&self, order_ids: &[OrderId]) -> Result<Vec<OrderFact>> {
        let requested: HashSet<OrderId> = order_ids.iter().copied().collect();
        let mut facts = Vec::new();

        for order in self.snapshot.orders.iter().filter(|o| requested.contains(&o.id)) {
            let Some(branch) = order
                .branch_id
                .and_then(|id| self.snapshot.branches.iter().find(|b| b.id == id))
            else {
                tracing::warn!("Order {} has no branch, skipping its lines", order.id);
                continue;
            };
            let company = self.company(order.company_id.or(Some(branch.company_id)));
            let destination = self.resolver.resolve(branch, company);

            for line in &order.lines {
                if self.horeca_dish(line.product_id).is_none() {
                    continue;
                }
                facts.push(OrderFact {
                    order_id: order.id,
                    destination_id: destination.id(),
                    destination_display_name: destination.display_name(),
                    product_id: line.product_id,
                    quantity: line.quantity,
                });
            }
        }

        Ok(facts)
    }

    async fn ingredient_specs(
        &self,
        product_ids: &[ProductId],
    ) -> Result<HashMap<ProductId, Vec<IngredientSpec>>> {
        let mut specs = HashMap::new();

        for &product_id in product_ids {
            let Some(dish) = self.horeca_dish(product_id) else {
                continue;
            };
            let dish_specs = dish
                .ingredients
                .iter()
                .map(|ingredient| {
                    validate_ingredient(product_id, ingredient)?;
                    Ok(IngredientSpec {
                        product_id,
                        ingredient_name: ingredient.ingredient_name.clone(),
                        measure_unit: ingredient.measure_unit,
                        per_unit_quantity: ingredient.quantity,
                        max_quantity_per_label: ingredient.max_quantity_horeca,
                        sequence_index: ingredient.order_index,
                        shelf_life_days: ingredient.shelf_life,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            specs.insert(product_id, dish_specs);
        }

        Ok(specs)
    }
}

#[async_trait]
impl ProductCatalog for JsonSnapshot {
    async fn products_for_label_generation(
        &self,
        product_ids: &[ProductId],
    ) -> Result<Vec<CatalogProduct>> {
        let mut seen = HashSet::new();
        let mut products = Vec::new();

        for &product_id in product_ids {
            if !seen.insert(product_id) {
                continue;
            }
            let Some(product) = self.snapshot.products.iter().find(|p| p.id == product_id) else {
                continue;
            };
            if !(product.has_nutritional_information && product.generate_label) {
                continue;
            }
            if self.horeca_dish(product_id).is_some() {
                continue;
            }
            products.push(CatalogProduct {
                id: product.id,
                name: product.name.clone(),
                production_area_name: product.production_area.clone(),
            });
        }

        Ok(products)
    }
}
