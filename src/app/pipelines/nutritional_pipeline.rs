use crate::core::{area_grouper, batching, chunk_planner, label_indexer, output};
use crate::core::{ConfigProvider, LabelPipeline, Storage};
use crate::domain::model::{
    CatalogProduct, LabelBatch, NutritionalLabel, PreparedLabels, ProductId, ProductSelection,
};
use crate::domain::ports::ProductCatalog;
use crate::utils::error::{LabelError, Result};
use std::collections::{HashMap, HashSet};
use std::path::Path;

pub const ARCHIVE_NAME: &str = "etiquetas_nutricionales.zip";

#[derive(Debug, Clone, Default)]
pub struct NutritionalRequest {
    pub product_ids: Vec<ProductId>,
    /// Labels per product; products not listed get one.
    pub quantities: HashMap<ProductId, u32>,
    /// dd/mm/yyyy
    pub elaboration_date: String,
    pub production_order_code: Option<String>,
}

/// Validates, groups by area, expands and chunks a product request.
///
/// `products` is the catalog's answer for `request.product_ids`; anything
/// requested but missing from it is reported in `not_found_ids`.
pub fn prepare_labels(
    request: &NutritionalRequest,
    products: &[CatalogProduct],
    chunk_size: usize,
    unassigned_area: &str,
) -> Result<PreparedLabels> {
    if products.is_empty() {
        return Err(LabelError::EmptyResult {
            message: "No se encontraron productos con información nutricional y etiqueta habilitada"
                .to_string(),
        });
    }

    let mut seen = HashSet::new();
    let valid_product_ids: Vec<ProductId> = products
        .iter()
        .map(|p| p.id)
        .filter(|id| seen.insert(*id))
        .collect();

    let mut reported = HashSet::new();
    let not_found_ids: Vec<ProductId> = request
        .product_ids
        .iter()
        .copied()
        .filter(|id| !seen.contains(id) && reported.insert(*id))
        .collect();

    let mut selected = HashSet::new();
    let selections: Vec<ProductSelection> = products
        .iter()
        .filter(|p| selected.insert(p.id))
        .map(|p| ProductSelection {
            product_id: p.id,
            production_area_name: p.production_area_name.clone(),
            quantity: request.quantities.get(&p.id).copied().unwrap_or(1),
        })
        .collect();

    let areas = area_grouper::group_with_fallback(&selections, unassigned_area);

    let mut chunks = Vec::new();
    let mut total_labels = 0;
    for (area_name, expanded) in &areas {
        total_labels += expanded.len();
        chunks.extend(chunk_planner::plan(area_name, expanded, chunk_size));
    }

    Ok(PreparedLabels {
        chunks,
        total_labels,
        valid_product_ids,
        not_found_ids,
    })
}

pub struct NutritionalLabelPipeline<Cat: ProductCatalog, S: Storage, C: ConfigProvider> {
    catalog: Cat,
    storage: S,
    config: C,
    request: NutritionalRequest,
}

impl<Cat: ProductCatalog, S: Storage, C: ConfigProvider> NutritionalLabelPipeline<Cat, S, C> {
    pub fn new(catalog: Cat, storage: S, config: C, request: NutritionalRequest) -> Self {
        Self {
            catalog,
            storage,
            config,
            request,
        }
    }

    pub fn prepare(&self, products: &[CatalogProduct]) -> Result<PreparedLabels> {
        prepare_labels(
            &self.request,
            products,
            self.config.nutritional_labels_per_chunk(),
            self.config.unassigned_area_name(),
        )
    }
}

#[async_trait::async_trait]
impl<Cat: ProductCatalog, S: Storage, C: ConfigProvider> LabelPipeline
    for NutritionalLabelPipeline<Cat, S, C>
{
    type Input = Vec<CatalogProduct>;
    type Row = NutritionalLabel;

    fn name(&self) -> &str {
        "nutritional"
    }

    async fn extract(&self) -> Result<Vec<CatalogProduct>> {
        self.catalog
            .products_for_label_generation(&self.request.product_ids)
            .await
    }

    async fn transform(&self, products: Vec<CatalogProduct>) -> Result<Vec<LabelBatch<NutritionalLabel>>> {
        let prepared = self.prepare(&products)?;

        if !prepared.not_found_ids.is_empty() {
            tracing::warn!(
                "{} product(s) skipped without label data: {:?}",
                prepared.not_found_ids.len(),
                prepared.not_found_ids
            );
        }
        if prepared.total_labels == 0 {
            return Err(LabelError::EmptyResult {
                message: "Las cantidades solicitadas no generan etiquetas".to_string(),
            });
        }

        let names: HashMap<ProductId, &str> =
            products.iter().map(|p| (p.id, p.name.as_str())).collect();
        let production_order_code = self.request.production_order_code.as_deref();

        let mut batches = Vec::with_capacity(prepared.chunks.len());
        let mut area_ordinal = 0;
        let mut current_area: Option<&str> = None;
        for chunk in &prepared.chunks {
            if current_area != Some(chunk.area_name.as_str()) {
                area_ordinal += 1;
                current_area = Some(chunk.area_name.as_str());
            }

            let records: Vec<NutritionalLabel> = label_indexer::expand(
                &chunk.product_ids,
                &chunk.quantities,
                &chunk.product_start_indexes,
            )
            .into_iter()
            .map(|instance| NutritionalLabel {
                area_name: chunk.area_name.clone(),
                product_id: instance.product_id,
                product_name: names
                    .get(&instance.product_id)
                    .copied()
                    .unwrap_or_default()
                    .to_string(),
                label_index: instance.label_index,
                elaboration_date: self.request.elaboration_date.clone(),
                production_order_code: self.request.production_order_code.clone(),
            })
            .collect();

            batches.push(LabelBatch {
                file_stem: batching::nutritional_file_stem(
                    area_ordinal,
                    &chunk.area_name,
                    chunk.chunk_number,
                ),
                description: batching::nutritional_description(chunk, production_order_code),
                records,
            });
        }

        Ok(batches)
    }

    async fn load(&self, batches: Vec<LabelBatch<NutritionalLabel>>) -> Result<String> {
        let archive = self.config.archive_output().then_some(ARCHIVE_NAME);
        let written = output::write_batches(
            &self.storage,
            &batches,
            self.config.output_formats(),
            archive,
        )
        .await?;
        tracing::debug!("Wrote {} file(s)", written.len());

        let base = Path::new(self.config.output_path());
        Ok(match archive {
            Some(name) => base.join(name).display().to_string(),
            None => base.display().to_string(),
        })
    }
}
