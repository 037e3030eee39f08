pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{JsonSnapshot, LocalStorage};
pub use app::pipelines::{HorecaLabelPipeline, HorecaRequest, NutritionalLabelPipeline, NutritionalRequest};
pub use config::LabelConfig;
pub use crate::core::engine::LabelEngine;
pub use utils::error::{LabelError, Result};
