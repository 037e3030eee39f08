use crate::core::{aggregator, batching, output};
use crate::core::{ConfigProvider, LabelPipeline, Storage};
use crate::domain::model::{
    AggregationReport, HorecaLabel, IngredientSpec, LabelBatch, OrderFact, OrderId, ProductId,
};
use crate::domain::ports::HorecaLabelSource;
use crate::utils::error::{LabelError, Result};
use std::collections::{HashMap, HashSet};
use std::path::Path;

pub const ARCHIVE_NAME: &str = "etiquetas_horeca.zip";

#[derive(Debug, Clone)]
pub struct HorecaRequest {
    pub order_ids: Vec<OrderId>,
    /// dd/mm/yyyy
    pub elaboration_date: String,
}

#[derive(Debug, Clone, Default)]
pub struct HorecaInput {
    pub order_facts: Vec<OrderFact>,
    pub ingredient_specs: HashMap<ProductId, Vec<IngredientSpec>>,
}

pub struct HorecaLabelPipeline<Src: HorecaLabelSource, S: Storage, C: ConfigProvider> {
    source: Src,
    storage: S,
    config: C,
    request: HorecaRequest,
}

impl<Src: HorecaLabelSource, S: Storage, C: ConfigProvider> HorecaLabelPipeline<Src, S, C> {
    pub fn new(source: Src, storage: S, config: C, request: HorecaRequest) -> Self {
        Self {
            source,
            storage,
            config,
            request,
        }
    }

    /// Aggregates without splitting into print batches.
    pub fn aggregate(&self, input: &HorecaInput) -> AggregationReport {
        let report = aggregator::aggregate_with_report(&input.order_facts, &input.ingredient_specs);
        if !report.conflicts.is_empty() {
            tracing::warn!(
                "{} ingredient spec conflict(s) resolved with the first-encountered spec",
                report.conflicts.len()
            );
        }
        report
    }
}

fn apply_default_max(
    specs: &mut HashMap<ProductId, Vec<IngredientSpec>>,
    default_max: Option<rust_decimal::Decimal>,
) {
    let Some(default_max) = default_max else {
        return;
    };
    for spec in specs.values_mut().flatten() {
        if spec.max_quantity_per_label.is_none() {
            spec.max_quantity_per_label = Some(default_max);
        }
    }
}

#[async_trait::async_trait]
impl<Src: HorecaLabelSource, S: Storage, C: ConfigProvider> LabelPipeline
    for HorecaLabelPipeline<Src, S, C>
{
    type Input = HorecaInput;
    type Row = HorecaLabel;

    fn name(&self) -> &str {
        "HORECA"
    }

    async fn extract(&self) -> Result<HorecaInput> {
        let order_facts = self.source.order_facts(&self.request.order_ids).await?;
        tracing::debug!(
            "Fetched {} HORECA order line(s) for {} order(s)",
            order_facts.len(),
            self.request.order_ids.len()
        );

        let mut seen = HashSet::new();
        let product_ids: Vec<ProductId> = order_facts
            .iter()
            .map(|fact| fact.product_id)
            .filter(|id| seen.insert(*id))
            .collect();

        let mut ingredient_specs = self.source.ingredient_specs(&product_ids).await?;
        apply_default_max(&mut ingredient_specs, self.config.default_max_quantity_per_label());

        Ok(HorecaInput {
            order_facts,
            ingredient_specs,
        })
    }

    async fn transform(&self, input: HorecaInput) -> Result<Vec<LabelBatch<HorecaLabel>>> {
        let report = self.aggregate(&input);

        if report.groups.is_empty() {
            return Err(LabelError::EmptyResult {
                message: "No se encontraron ingredientes HORECA para las órdenes solicitadas"
                    .to_string(),
            });
        }

        let labels = batching::expand_horeca_labels(&report.groups, &self.request.elaboration_date);
        if labels.is_empty() {
            return Err(LabelError::EmptyResult {
                message: "No se generaron etiquetas después de expandir los pesos".to_string(),
            });
        }

        tracing::info!(
            "{} label group(s) expanded into {} HORECA label(s)",
            report.groups.len(),
            labels.len()
        );

        Ok(batching::batch_horeca_labels(
            labels,
            self.config.horeca_labels_per_chunk(),
        ))
    }

    async fn load(&self, batches: Vec<LabelBatch<HorecaLabel>>) -> Result<String> {
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
