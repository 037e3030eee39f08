use crate::domain::model::{CatalogProduct, IngredientSpec, LabelBatch, OrderFact, OrderId, ProductId};
use crate::utils::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn archive_output(&self) -> bool;
    fn horeca_labels_per_chunk(&self) -> usize;
    fn default_max_quantity_per_label(&self) -> Option<Decimal>;
    fn nutritional_labels_per_chunk(&self) -> usize;
    fn unassigned_area_name(&self) -> &str;
}

/// Read side of orders and plated dishes.
#[async_trait]
pub trait HorecaLabelSource: Send + Sync {
    /// Order lines of HORECA products, already resolved to their destination.
    async fn order_facts(&self, order_ids: &[OrderId]) -> Result<Vec<OrderFact>>;

    /// Ingredient breakdown per product. Products without one are absent.
    async fn ingredient_specs(
        &self,
        product_ids: &[ProductId],
    ) -> Result<HashMap<ProductId, Vec<IngredientSpec>>>;
}

/// Product validator: only products that exist, have label generation
/// enabled and are not HORECA dishes are returned.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn products_for_label_generation(
        &self,
        product_ids: &[ProductId],
    ) -> Result<Vec<CatalogProduct>>;
}

#[async_trait]
pub trait LabelPipeline: Send + Sync {
    type Input: Send;
    type Row: serde::Serialize + Send + Sync;

    fn name(&self) -> &str;
    async fn extract(&self) -> Result<Self::Input>;
    async fn transform(&self, input: Self::Input) -> Result<Vec<LabelBatch<Self::Row>>>;
    async fn load(&self, batches: Vec<LabelBatch<Self::Row>>) -> Result<String>;
}
