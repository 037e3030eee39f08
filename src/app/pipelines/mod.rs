pub mod horeca_pipeline;
pub mod nutritional_pipeline;

pub use horeca_pipeline::{HorecaLabelPipeline, HorecaRequest};
pub use nutritional_pipeline::{prepare_labels, NutritionalLabelPipeline, NutritionalRequest};
